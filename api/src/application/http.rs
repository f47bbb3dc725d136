pub mod health;
pub mod history;
pub mod meal_analysis;
pub mod server;
#[cfg(test)]
pub mod test;
