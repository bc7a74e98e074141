pub mod content;
pub mod drafts;
pub mod pages;
pub mod public;
