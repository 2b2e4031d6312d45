//! Dashboard totals and the CSV export.

use std::path::Path;

use crate::commands::require_admin;
use crate::context::AppContext;

pub async fn dashboard(ctx: &AppContext) -> anyhow::Result<()> {
    require_admin(ctx).await?;

    ctx.registrations.fetch_all_registrations().await?;
    ctx.classes.fetch_classes(None).await?;

    let stats = ctx.registrations.stats();
    let classes = ctx.classes.snapshot().classes;
    let enrolled: u32 = classes.iter().map(|c| c.class.current_students).sum();
    let capacity: u32 = classes.iter().map(|c| c.class.max_students).sum();

    println!(
        "Registrations: {} total ({} pending, {} approved, {} rejected)",
        stats.total, stats.pending, stats.approved, stats.rejected
    );
    println!(
        "Enrollment:    {}/{} seats filled across {} class(es)",
        enrolled,
        capacity,
        classes.len()
    );
    if stats.discarded > 0 {
        println!(
            "⚠️  Data quality: {} registration row(s) with missing student data were excluded",
            stats.discarded
        );
    }

    let snapshot = ctx.registrations.snapshot();
    let mut recent = snapshot.registrations;
    recent.sort_by(|a, b| b.student.created_at.cmp(&a.student.created_at));
    if !recent.is_empty() {
        println!("Recent registrations:");
        for registration in recent.iter().take(5) {
            println!(
                "  {}  {} (age {})  {}",
                registration.student.created_at.format("%Y-%m-%d"),
                registration.student.full_name(),
                registration.student.age,
                registration.student.registration_status,
            );
        }
    }
    Ok(())
}

pub async fn export(ctx: &AppContext, output: &Path) -> anyhow::Result<()> {
    require_admin(ctx).await?;

    ctx.registrations.fetch_all_registrations().await?;
    let snapshot = ctx.registrations.snapshot();

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record([
        "Student Name",
        "Age",
        "Date of Birth",
        "Status",
        "Parent Name",
        "Parent Phone",
        "Parent Email",
        "Class",
        "Teacher",
    ])?;
    for registration in &snapshot.registrations {
        writer.write_record([
            registration.student.full_name(),
            registration.student.age.to_string(),
            registration
                .student
                .date_of_birth
                .format("%Y-%m-%d")
                .to_string(),
            registration.student.registration_status.to_string(),
            format!(
                "{} {}",
                registration.parent.father_first_name, registration.parent.father_last_name
            ),
            registration.parent.father_phone.clone(),
            registration.parent.father_email.clone(),
            registration
                .class
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "unassigned".to_string()),
            registration
                .teacher
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    println!(
        "✅ Exported {} registration(s) to {}",
        snapshot.registrations.len(),
        output.display()
    );
    if snapshot.discarded > 0 {
        println!(
            "⚠️  {} malformed row(s) were excluded from the export",
            snapshot.discarded
        );
    }
    Ok(())
}
