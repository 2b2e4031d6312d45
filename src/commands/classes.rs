//! Class catalog commands.

use clap::Subcommand;

use maktab_models::classes::{CreateClassRequest, UpdateClassRequest};
use maktab_models::ids::{ClassId, TeacherId};

use crate::commands::require_admin;
use crate::context::AppContext;
use crate::gate::require_super_admin;

#[derive(Subcommand)]
pub enum ClassesCommand {
    /// List classes, optionally filtered by a child's age
    List {
        /// Only show classes whose age band includes this age
        #[arg(short, long)]
        age: Option<u8>,
    },
    /// Show one class
    Show { id: String },
    /// Create a class
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        start_time: String,
        #[arg(long)]
        end_time: String,
        #[arg(long)]
        age_min: u8,
        #[arg(long)]
        age_max: u8,
        #[arg(long, default_value = "15")]
        max_students: u32,
        #[arg(long)]
        teacher_id: Option<String>,
    },
    /// Update a class
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long)]
        age_min: Option<u8>,
        #[arg(long)]
        age_max: Option<u8>,
        #[arg(long)]
        max_students: Option<u32>,
        #[arg(long)]
        teacher_id: Option<String>,
    },
    /// Delete a class (super_admin only)
    Delete { id: String },
}

pub async fn dispatch(ctx: &AppContext, command: ClassesCommand) -> anyhow::Result<()> {
    let admin = require_admin(ctx).await?;

    match command {
        ClassesCommand::List { age } => {
            ctx.classes.fetch_classes(age).await?;
            let snapshot = ctx.classes.snapshot();
            if snapshot.classes.is_empty() {
                println!("No classes found");
                return Ok(());
            }
            for class in &snapshot.classes {
                let teacher = class
                    .teacher
                    .as_ref()
                    .map(|t| t.name.as_str())
                    .unwrap_or("unassigned");
                println!(
                    "{}  {} ({}-{})  ages {}-{}  {}/{} enrolled{}  teacher: {}",
                    class.class.id,
                    class.class.name,
                    class.class.start_time,
                    class.class.end_time,
                    class.class.age_min,
                    class.class.age_max,
                    class.class.current_students,
                    class.class.max_students,
                    if class.is_full { " [FULL]" } else { "" },
                    teacher,
                );
            }
            Ok(())
        }
        ClassesCommand::Show { id } => {
            match ctx.classes.get_class(&ClassId::from(id.as_str())).await {
                Some(class) => {
                    println!("Name:       {}", class.class.name);
                    println!("Schedule:   {} - {}", class.class.start_time, class.class.end_time);
                    println!("Age band:   {} - {}", class.class.age_min, class.class.age_max);
                    println!(
                        "Enrollment: {}/{} ({} spots left)",
                        class.class.current_students, class.class.max_students, class.available_spots
                    );
                    if let Some(teacher) = &class.teacher {
                        println!("Teacher:    {} <{}>", teacher.name, teacher.email);
                    }
                    Ok(())
                }
                None => {
                    let error = ctx.classes.snapshot().error.unwrap_or_default();
                    anyhow::bail!("class not found: {error}");
                }
            }
        }
        ClassesCommand::Create {
            name,
            start_time,
            end_time,
            age_min,
            age_max,
            max_students,
            teacher_id,
        } => {
            let request = CreateClassRequest {
                name,
                start_time,
                end_time,
                age_min,
                age_max,
                max_students,
                teacher_id: teacher_id.map(TeacherId::from),
            };
            let class = ctx.classes.create_class(&request).await?;
            println!("✅ Class created: {} ({})", class.class.name, class.class.id);
            Ok(())
        }
        ClassesCommand::Update {
            id,
            name,
            start_time,
            end_time,
            age_min,
            age_max,
            max_students,
            teacher_id,
        } => {
            let request = UpdateClassRequest {
                name,
                start_time,
                end_time,
                age_min,
                age_max,
                max_students,
                teacher_id: teacher_id.map(TeacherId::from),
            };
            let class = ctx
                .classes
                .update_class(&ClassId::from(id.as_str()), &request)
                .await?;
            println!("✅ Class updated: {}", class.class.name);
            Ok(())
        }
        ClassesCommand::Delete { id } => {
            require_super_admin(&admin)?;
            ctx.classes.delete_class(&ClassId::from(id.as_str())).await?;
            println!("✅ Class deleted");
            Ok(())
        }
    }
}
