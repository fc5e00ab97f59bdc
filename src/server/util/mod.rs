pub mod code;
pub mod markdown;

#[cfg(test)]
mod test;
