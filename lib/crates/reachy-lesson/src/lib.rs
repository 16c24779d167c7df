pub mod course;
pub mod faq;
pub mod motion;
pub mod text;

pub use course::{Course, CourseError, LessonLevel, MenuKeyword, QaEntry};
pub use faq::{build_knowledge_base, match_faq};
pub use motion::MotionId;
pub use text::{is_correct_answer, normalize, parse_menu_choice, tokenize};
