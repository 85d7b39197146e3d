mod config;
mod countdown;
mod table;
