pub mod catalog;
pub mod envelope;
pub mod indices;
pub mod odontogram;
pub mod patient;
pub mod tooth;
