pub mod oauth1;
