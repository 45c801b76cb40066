pub mod list_students;
