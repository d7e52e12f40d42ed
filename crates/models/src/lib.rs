pub mod errors;
pub mod db;
pub mod room;

#[cfg(test)]
mod tests;
