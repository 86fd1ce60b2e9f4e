//! Listing commands for classrooms, assignments and student repositories

use anyhow::Result;

use crate::classroom::{Assignment, ClassroomClient};
use crate::credentials::resolve_token;
use crate::settings::Settings;

async fn client(settings: &Settings) -> Result<ClassroomClient> {
    let (token, _) = resolve_token(settings)?;
    Ok(ClassroomClient::new(token)?)
}

/// Lists active classrooms
pub async fn handle_list_classrooms(settings: &Settings) -> Result<()> {
    let classrooms = client(settings).await?.classrooms().await?;
    let active: Vec<_> = classrooms.iter().filter(|c| !c.archived).collect();

    if active.is_empty() {
        println!("No classrooms found.");
        return Ok(());
    }
    println!("{:>10}  NAME", "ID");
    for classroom in active {
        println!("{:>10}  {}", classroom.id, classroom.name);
    }
    Ok(())
}

/// Lists the assignments of a classroom
pub async fn handle_list_assignments(classroom_id: u64, settings: &Settings) -> Result<()> {
    let assignments = client(settings).await?.assignments(classroom_id).await?;

    if assignments.is_empty() {
        println!("No assignments found for this classroom.");
        return Ok(());
    }
    println!(
        "{:>10}  {:30} {:>8} {:>9}  DEADLINE",
        "ID", "SLUG", "ACCEPTED", "SUBMITTED"
    );
    for assignment in &assignments {
        println!("{}", assignment_row(assignment));
    }
    Ok(())
}

fn assignment_row(assignment: &Assignment) -> String {
    let deadline = assignment
        .deadline
        .map(|deadline| deadline.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>10}  {:30} {:>8} {:>9}  {}",
        assignment.id, assignment.slug, assignment.accepted, assignment.submitted, deadline
    )
}

/// Lists the student repositories of an assignment
pub async fn handle_list_repos(assignment_id: u64, settings: &Settings) -> Result<()> {
    let accepted = client(settings)
        .await?
        .accepted_assignments(assignment_id)
        .await?;

    if accepted.is_empty() {
        println!("No student submissions were found for this assignment.");
        return Ok(());
    }
    for entry in &accepted {
        let marker = if entry.submitted { "🟢" } else { "🟡" };
        println!(
            "{} {:40} {}  {}",
            marker,
            entry.repository.name,
            entry.student_logins(),
            entry.repository.html_url
        );
    }
    println!("\n{} repositories", accepted.len());
    Ok(())
}
