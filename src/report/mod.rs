pub mod histogram_txt;
pub mod html;
pub mod pdf;
mod script;
pub mod summary_txt;
