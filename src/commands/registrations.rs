//! Registration commands: the public submission flow plus admin review.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use maktab_models::ids::{ClassId, StudentId};
use maktab_models::registrations::{
    ParentForm, RegistrationForm, RegistrationQuery, RegistrationStatus, StudentForm,
};

use crate::commands::require_admin;
use crate::context::AppContext;
use crate::gate::require_super_admin;

/// The public registration form as command-line arguments.
#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub father_first_name: String,
    #[arg(long)]
    pub father_last_name: String,
    #[arg(long)]
    pub father_phone: String,
    #[arg(long)]
    pub father_email: String,
    #[arg(long)]
    pub mother_first_name: Option<String>,
    #[arg(long)]
    pub mother_last_name: Option<String>,
    #[arg(long)]
    pub mother_phone: Option<String>,
    #[arg(long)]
    pub mother_email: Option<String>,
    #[arg(long)]
    pub student_first_name: String,
    #[arg(long)]
    pub student_last_name: String,
    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: NaiveDate,
    /// Class to request a spot in
    #[arg(long)]
    pub class_id: Option<String>,
}

#[derive(Subcommand)]
pub enum RegistrationsCommand {
    /// List registrations
    List {
        /// Filter by status (pending, approved, rejected)
        #[arg(long)]
        status: Option<String>,
        /// Filter by assigned class
        #[arg(long)]
        class_id: Option<String>,
        /// Search by student or parent name
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: i64,
        #[arg(long, default_value = "10")]
        limit: i64,
    },
    /// Show one registration
    Show { id: String },
    /// Approve a registration (super_admin only)
    Approve { id: String },
    /// Reject a registration (super_admin only)
    Reject { id: String },
    /// Assign a registration to a class, or clear with no --class-id
    /// (super_admin only)
    AssignClass {
        id: String,
        #[arg(long)]
        class_id: Option<String>,
    },
}

/// The public flow: no sign-in, validated client-side before the POST.
pub async fn register(ctx: &AppContext, args: RegisterArgs) -> anyhow::Result<()> {
    let form = RegistrationForm {
        parent: ParentForm {
            father_first_name: args.father_first_name,
            father_last_name: args.father_last_name,
            father_phone: args.father_phone,
            father_email: args.father_email,
            mother_first_name: args.mother_first_name,
            mother_last_name: args.mother_last_name,
            mother_phone: args.mother_phone,
            mother_email: args.mother_email,
        },
        student: StudentForm {
            first_name: args.student_first_name,
            last_name: args.student_last_name,
            date_of_birth: args.date_of_birth,
            class_id: args.class_id.map(|id| ClassId::from(id.as_str())),
        },
    };

    let receipt = ctx.registrations.submit_registration(&form).await?;
    println!("✅ Registration submitted");
    println!("   Student ID: {}", receipt.student_id);
    println!("   Parent ID:  {}", receipt.parent_id);
    Ok(())
}

fn parse_status(value: &str) -> anyhow::Result<RegistrationStatus> {
    match value {
        "pending" => Ok(RegistrationStatus::Pending),
        "approved" => Ok(RegistrationStatus::Approved),
        "rejected" => Ok(RegistrationStatus::Rejected),
        other => anyhow::bail!("unknown status {other:?}; expected pending, approved, or rejected"),
    }
}

pub async fn dispatch(ctx: &AppContext, command: RegistrationsCommand) -> anyhow::Result<()> {
    let admin = require_admin(ctx).await?;

    match command {
        RegistrationsCommand::List {
            status,
            class_id,
            search,
            page,
            limit,
        } => {
            let query = RegistrationQuery {
                page: Some(page),
                limit: Some(limit),
                sort: None,
                search,
                status: status.as_deref().map(parse_status).transpose()?,
                class_id: class_id.map(|id| ClassId::from(id.as_str())),
            };
            ctx.registrations.fetch_registrations(&query).await?;
            let snapshot = ctx.registrations.snapshot();

            for registration in &snapshot.registrations {
                let class = registration
                    .class
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .unwrap_or("unassigned");
                println!(
                    "{}  {} (age {})  {}  class: {}  parent: {} {}",
                    registration.student.id,
                    registration.student.full_name(),
                    registration.student.age,
                    registration.student.registration_status,
                    class,
                    registration.parent.father_first_name,
                    registration.parent.father_phone,
                );
            }
            if let Some(info) = &snapshot.pagination {
                println!(
                    "Page {}/{} ({} total)",
                    info.page, info.pages, info.total
                );
            }
            if snapshot.discarded > 0 {
                println!(
                    "⚠️  {} row(s) with missing student data were excluded",
                    snapshot.discarded
                );
            }
            Ok(())
        }
        RegistrationsCommand::Show { id } => {
            match ctx
                .registrations
                .get_registration(&StudentId::from(id.as_str()))
                .await
            {
                Some(registration) => {
                    println!("Student: {}", registration.student.full_name());
                    println!("Age:     {}", registration.student.age);
                    println!("Status:  {}", registration.student.registration_status);
                    println!(
                        "Parent:  {} {} <{}> {}",
                        registration.parent.father_first_name,
                        registration.parent.father_last_name,
                        registration.parent.father_email,
                        registration.parent.father_phone,
                    );
                    if let Some(class) = &registration.class {
                        println!("Class:   {} ({}-{})", class.name, class.start_time, class.end_time);
                    }
                    if let Some(teacher) = &registration.teacher {
                        println!("Teacher: {}", teacher.name);
                    }
                    Ok(())
                }
                None => {
                    let error = ctx.registrations.snapshot().error.unwrap_or_default();
                    anyhow::bail!("registration not found: {error}");
                }
            }
        }
        RegistrationsCommand::Approve { id } => {
            require_super_admin(&admin)?;
            ctx.registrations
                .update_status(&StudentId::from(id.as_str()), RegistrationStatus::Approved)
                .await?;
            println!("✅ Registration approved");
            Ok(())
        }
        RegistrationsCommand::Reject { id } => {
            require_super_admin(&admin)?;
            ctx.registrations
                .update_status(&StudentId::from(id.as_str()), RegistrationStatus::Rejected)
                .await?;
            println!("✅ Registration rejected");
            Ok(())
        }
        RegistrationsCommand::AssignClass { id, class_id } => {
            require_super_admin(&admin)?;
            let class_id = class_id.map(|id| ClassId::from(id.as_str()));
            let cleared = class_id.is_none();
            ctx.registrations
                .update_class(&StudentId::from(id.as_str()), class_id)
                .await?;
            if cleared {
                println!("✅ Class assignment cleared");
            } else {
                println!("✅ Class assigned");
            }
            Ok(())
        }
    }
}
