pub mod curriculum;
pub mod domain;
pub mod grade;
pub mod level;
pub mod subject;

pub use curriculum::Curriculum;
pub use domain::{DomainDraft, EducationDomain};
pub use grade::Grade;
pub use level::Level;
pub use subject::Subject;
