//! Teacher roster commands.

use clap::Subcommand;

use maktab_models::ids::TeacherId;
use maktab_models::teachers::{CreateTeacherRequest, UpdateTeacherRequest};

use crate::commands::require_admin;
use crate::context::AppContext;
use crate::gate::require_super_admin;

#[derive(Subcommand)]
pub enum TeachersCommand {
    /// List teachers
    List,
    /// Show one teacher
    Show { id: String },
    /// Add a teacher
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        specialization: Option<String>,
    },
    /// Update a teacher
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
    },
    /// Remove a teacher (super_admin only)
    Delete { id: String },
}

pub async fn dispatch(ctx: &AppContext, command: TeachersCommand) -> anyhow::Result<()> {
    let admin = require_admin(ctx).await?;

    match command {
        TeachersCommand::List => {
            ctx.teachers.fetch_teachers().await?;
            let snapshot = ctx.teachers.snapshot();
            if snapshot.teachers.is_empty() {
                println!("No teachers found");
                return Ok(());
            }
            for teacher in &snapshot.teachers {
                let specialization = teacher
                    .specialization
                    .as_deref()
                    .unwrap_or("general");
                println!(
                    "{}  {} <{}>  {}  {} class(es)  [{}]",
                    teacher.id,
                    teacher.name,
                    teacher.email,
                    teacher.phone,
                    teacher.class_count,
                    specialization,
                );
            }
            Ok(())
        }
        TeachersCommand::Show { id } => {
            match ctx.teachers.get_teacher(&TeacherId::from(id.as_str())).await {
                Some(teacher) => {
                    println!("Name:           {}", teacher.name);
                    println!("Email:          {}", teacher.email);
                    println!("Phone:          {}", teacher.phone);
                    if let Some(specialization) = &teacher.specialization {
                        println!("Specialization: {specialization}");
                    }
                    println!("Classes:        {}", teacher.class_count);
                    Ok(())
                }
                None => {
                    let error = ctx.teachers.snapshot().error.unwrap_or_default();
                    anyhow::bail!("teacher not found: {error}");
                }
            }
        }
        TeachersCommand::Create {
            name,
            email,
            phone,
            specialization,
        } => {
            let request = CreateTeacherRequest {
                name,
                email,
                phone,
                specialization,
            };
            let teacher = ctx.teachers.create_teacher(&request).await?;
            println!("✅ Teacher added: {} ({})", teacher.name, teacher.id);
            Ok(())
        }
        TeachersCommand::Update {
            id,
            name,
            email,
            phone,
            specialization,
        } => {
            let request = UpdateTeacherRequest {
                name,
                email,
                phone,
                specialization,
            };
            let teacher = ctx
                .teachers
                .update_teacher(&TeacherId::from(id.as_str()), &request)
                .await?;
            println!("✅ Teacher updated: {}", teacher.name);
            Ok(())
        }
        TeachersCommand::Delete { id } => {
            require_super_admin(&admin)?;
            ctx.teachers
                .delete_teacher(&TeacherId::from(id.as_str()))
                .await?;
            println!("✅ Teacher removed");
            Ok(())
        }
    }
}
