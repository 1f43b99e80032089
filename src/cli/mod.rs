pub mod complete;
pub mod create;
pub mod get;
pub mod list;
pub mod rate_limit;

use crate::reminder::codec::render_date;
use crate::reminder::types::Reminder;

/// Print a reminder as an aligned block.
pub(crate) fn print_reminder(reminder: &Reminder) {
    println!("Reminder #{}", reminder.issue_number);
    println!("{}", "=".repeat(40));
    println!("  Title:        {}", reminder.title);
    println!("  Status:       {}", reminder.status);
    println!("  Due:          {}", render_date(&reminder.due_date));
    println!("  Priority:     {}", reminder.priority);
    if let Some(ref category) = reminder.category {
        println!("  Category:     {category}");
    }
    println!("  Created:      {}", render_date(&reminder.created_at));
    if let Some(ref completed_at) = reminder.completed_at {
        println!("  Completed:    {}", render_date(completed_at));
    }
    println!("  URL:          {}", reminder.url);
    if reminder.is_degraded() {
        println!("  (metadata block unreadable; due date is a fallback)");
    }
    if !reminder.description.is_empty() {
        println!();
        println!("{}", reminder.description);
    }
}
