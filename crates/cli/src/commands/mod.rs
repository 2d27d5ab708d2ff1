pub mod inspect;
pub mod run;
pub mod sync;
pub mod verify;
