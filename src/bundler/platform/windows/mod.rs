//! Windows packaging.
//!
//! The Windows release is an NSIS installer plus a `.zip` archive; this module
//! holds the installer side.

pub mod nsis;
