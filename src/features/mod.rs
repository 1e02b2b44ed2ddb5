pub mod ocean;
