/*!
Platform specific directory content readers.
*/

#[cfg(unix)]
pub mod unix;
