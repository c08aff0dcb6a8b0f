//! Draft subcommands: save, get, list, find, types, delete, clear.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use draftbox_types::draft::{DraftId, DraftRecord, NewDraft};

use crate::state::AppState;

/// Parse the payload as JSON, falling back to a JSON string.
///
/// `draftbox save blog "Intro" '{"body":"..."}'` stores the object, while
/// `draftbox save blog "Intro" hello` stores the string `"hello"`.
pub fn parse_data(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

fn preview(value: &serde_json::Value) -> String {
    let text = serde_json::to_string(value).unwrap_or_default();
    if text.chars().count() > 60 {
        let head: String = text.chars().take(57).collect();
        format!("{head}...")
    } else {
        text
    }
}

fn timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub async fn save_draft(
    state: &AppState,
    draft_type: String,
    title: String,
    data: &str,
    id: Option<String>,
    json: bool,
) -> Result<()> {
    let requested = id.map(DraftId::from);
    let draft = NewDraft::new(title, parse_data(data), draft_type);

    let saved = state
        .draft_service
        .save_draft(requested.as_ref(), draft)
        .await
        .context("Failed to save draft")?;
    let created = requested.as_ref() != Some(&saved);

    if json {
        let result = serde_json::json!({
            "id": saved,
            "created": created,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let verb = if created { "Created" } else { "Updated" };
        println!();
        println!("  {} {} draft {}", style("ok").green(), verb, style(&saved).cyan());
        if created && requested.is_some() {
            println!(
                "     {}",
                style("(the requested id no longer exists, saved as a new draft)").dim()
            );
        }
        println!();
    }

    Ok(())
}

pub async fn show_draft(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id = DraftId::from(id);
    let draft = state.draft_service.get_draft_by_id(&id).await?;

    match draft {
        Some(draft) if json => {
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        Some(draft) => {
            println!();
            println!("  {} {}", style(&draft.title).cyan().bold(), style(&draft.id).dim());
            println!("  Type:    {}", draft.draft_type);
            println!("  Created: {}", timestamp(&draft.created_at));
            println!("  Updated: {}", timestamp(&draft.updated_at));
            println!();
            println!("{}", serde_json::to_string_pretty(&draft.data)?);
            println!();
        }
        None if json => {
            println!("{}", serde_json::json!({"id": id, "draft": null}));
        }
        None => {
            println!();
            println!("  {} Draft '{}' not found", style("i").blue().bold(), style(&id).cyan());
            println!();
        }
    }

    Ok(())
}

pub async fn list_drafts(state: &AppState, draft_type: &str, json: bool) -> Result<()> {
    let drafts = state.draft_service.get_all_drafts_by_type(draft_type).await?;
    print_drafts(&drafts, &format!("'{draft_type}' drafts"), json)
}

pub async fn list_all_drafts(state: &AppState, json: bool) -> Result<()> {
    let drafts = state.draft_service.get_all_drafts().await?;
    print_drafts(&drafts, "All drafts", json)
}

pub async fn find_drafts(state: &AppState, draft_type: &str, title: &str, json: bool) -> Result<()> {
    let drafts = state
        .draft_service
        .find_drafts_by_title(draft_type, title)
        .await?;
    print_drafts(&drafts, &format!("'{draft_type}' drafts titled '{title}'"), json)
}

fn print_drafts(drafts: &[DraftRecord], heading: &str, json: bool) -> Result<()> {
    if json {
        let result = serde_json::json!({
            "drafts": drafts,
            "count": drafts.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if drafts.is_empty() {
        println!("  {} No {}.", style("i").blue().bold(), heading.to_lowercase());
        println!();
        return Ok(());
    }

    println!("  {} ({} entries)", heading, drafts.len());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
        Cell::new("Data Preview").fg(Color::White),
    ]);

    for draft in drafts {
        table.add_row(vec![
            Cell::new(&draft.id).fg(Color::DarkGrey),
            Cell::new(&draft.title).fg(Color::Cyan),
            Cell::new(&draft.draft_type),
            Cell::new(timestamp(&draft.updated_at)),
            Cell::new(preview(&draft.data)).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

pub async fn list_types(state: &AppState, json: bool) -> Result<()> {
    let types = state.draft_service.list_draft_types().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    println!();
    if types.is_empty() {
        println!("  {} No drafts stored.", style("i").blue().bold());
        println!("     Save one with: draftbox save <type> <title> <json-data>");
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Type").fg(Color::White),
        Cell::new("Drafts").fg(Color::White),
        Cell::new("Last Updated").fg(Color::White),
    ]);
    for summary in &types {
        table.add_row(vec![
            Cell::new(&summary.draft_type).fg(Color::Cyan),
            Cell::new(summary.count),
            Cell::new(timestamp(&summary.last_updated_at)),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

pub async fn delete_draft(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id = DraftId::from(id);
    state.draft_service.delete_draft(&id).await?;

    if json {
        println!("{}", serde_json::json!({"deleted": id}));
    } else {
        println!();
        println!("  {} Deleted draft {}", style("ok").green(), style(&id).cyan());
        println!();
    }

    Ok(())
}

pub async fn clear_drafts(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete {} drafts of every type?",
                style("all").red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.draft_service.clear_all_drafts().await?;

    if json {
        println!("{}", serde_json::json!({"cleared": true}));
    } else {
        println!("  {} All drafts deleted.", style("✓").red().bold());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_data_json_object() {
        assert_eq!(parse_data(r#"{"x": 1}"#), json!({"x": 1}));
    }

    #[test]
    fn test_parse_data_falls_back_to_string() {
        assert_eq!(parse_data("hello world"), json!("hello world"));
    }

    #[test]
    fn test_preview_truncates_long_payloads() {
        let long = json!({"body": "x".repeat(200)});
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 60);
        assert_eq!(preview(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
