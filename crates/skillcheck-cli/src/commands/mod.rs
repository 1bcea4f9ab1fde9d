pub mod check;
pub mod compare;
pub mod generate;
pub mod grade;
pub mod init;
pub mod list_skills;
pub mod normalize;
pub mod validate;
