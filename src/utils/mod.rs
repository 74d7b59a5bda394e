pub mod path;

#[cfg(test)]
mod utils_test;
