pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::views::{
    CurriculumWithLevelsCount, DomainWithCurriculumsCount, GradeWithSubjectsCount,
    LevelWithGradesCount,
};
pub use application::{TaxonomyStores, TaxonomyViews};
pub use domain::{Curriculum, DomainDraft, EducationDomain, Grade, Level, Subject};
