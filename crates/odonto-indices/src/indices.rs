pub mod ceo;
pub mod cpo;
