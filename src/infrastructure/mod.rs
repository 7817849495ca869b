pub mod db;
pub mod youtube;
