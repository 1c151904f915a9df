pub mod helper;

#[cfg(test)]
pub mod testing;
