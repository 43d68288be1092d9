//! Binary codec for Windows NT security descriptors (MS-DTYP §2.4).

pub mod dtyp;
pub mod error;
