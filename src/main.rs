//! Console snapshot of the admin data layer: signs in, loads every
//! collection, and prints the aggregated taxonomy with pending-teacher
//! counts. Useful for poking the API without the dashboard in front of it.

use anyhow::Context;

use qalam_admin::shared::session::{Session, SessionStore};
use qalam_admin::{init_logger, AdminApp, LoginPayload};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let base_url = std::env::var("QALAM_API_URL").context("QALAM_API_URL is not set")?;
    let state_file =
        std::env::var("QALAM_STATE_FILE").unwrap_or_else(|_| ".qalam-admin.json".to_string());

    let session = Session::with_store(base_url, SessionStore::new(state_file))?;
    let app = AdminApp::new(session)?;

    if !app.session.is_authenticated() {
        let email =
            std::env::var("QALAM_ADMIN_EMAIL").context("QALAM_ADMIN_EMAIL is not set")?;
        let password =
            std::env::var("QALAM_ADMIN_PASSWORD").context("QALAM_ADMIN_PASSWORD is not set")?;
        app.auth
            .login(LoginPayload {
                user_name_or_email: email,
                password,
            })
            .await?;
    }

    app.taxonomy.load_all().await?;
    let pending_teachers = app.teachers.load_pending().await?;

    println!("Domains ({}):", app.taxonomy.domains.len());
    for row in app.views.domains_with_curriculums.read() {
        println!(
            "  [{}] {} — {} active curriculums",
            row.domain.code, row.domain.name_en, row.curriculums_count
        );
    }

    println!("Curriculums ({}):", app.taxonomy.curriculums.len());
    for row in app.views.curriculums_with_levels.read() {
        println!(
            "  {} ({}) — {} levels{}",
            row.curriculum.name_en,
            row.curriculum.country,
            row.levels_count,
            if row.curriculum.is_active { "" } else { " [inactive]" }
        );
    }

    println!("Levels ({}):", app.taxonomy.levels.len());
    for row in app.views.levels_with_grades.read() {
        println!("  {} — {} grades", row.level.name_en, row.grades_count);
    }

    println!("Grades ({}):", app.taxonomy.grades.len());
    for row in app.views.grades_with_subjects.read() {
        println!("  {} — {} subjects", row.grade.name_en, row.subjects_count);
    }

    println!("Pending teacher registrations: {}", pending_teachers);
    for teacher in app.teachers.pending().snapshot() {
        println!(
            "  {} <{}> — {}/{} documents approved",
            teacher.full_name, teacher.email, teacher.approved_documents, teacher.total_documents
        );
    }

    Ok(())
}
