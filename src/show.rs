//! Plan-level rendering.
//!
//! Wraps the attribute diff engine with everything else `terraform show`
//! prints: the legend, per-resource headers, the resource blocks themselves,
//! the plan summary and the output-changes section.

use crate::diff::{map_actions, render_attributes, Action};
use crate::line::{write_arrow_line, write_scalar_line};
use crate::parser::{Plan, ResourceChange};
use crate::path;
use crate::tree::Value;
use crate::value::render_inline;
use crate::writer::{AnsiWriter, Style};

/// Renders a whole plan document the way `terraform show` would.
pub fn render_plan(plan: &Plan, use_color: bool) -> String {
    let mut w = AnsiWriter::new(use_color);
    let changes: Vec<(&ResourceChange, Action)> = plan
        .resource_changes
        .iter()
        .map(|rc| (rc, map_actions(&rc.change.actions)))
        .collect();
    let actions: Vec<Action> = changes.iter().map(|(_, action)| *action).collect();
    let outputs = collect_output_changes(plan.output_changes.as_ref());

    let has_resource_changes = actions
        .iter()
        .any(|action| !matches!(action, Action::NoOp | Action::Unknown));
    let has_output_changes = outputs
        .iter()
        .any(|output| !matches!(output.action, Action::NoOp | Action::Unknown));

    w.newline();
    if !has_resource_changes && !has_output_changes {
        w.write_line("No changes. Your infrastructure matches the configuration.");
        return w.into_string();
    }

    if has_resource_changes {
        render_legend(&mut w, &actions);
        w.write_line("Terraform will perform the following actions:");
        w.newline();
        for (rc, action) in &changes {
            if matches!(action, Action::NoOp | Action::Unknown) {
                continue;
            }
            render_resource(&mut w, rc, *action);
        }
        render_summary(&mut w, &actions);
    }
    if has_output_changes {
        if has_resource_changes {
            w.newline();
        }
        render_output_changes(&mut w, &outputs);
    }
    w.into_string()
}

fn render_legend(w: &mut AnsiWriter, actions: &[Action]) {
    let any = |wanted: &[Action]| actions.iter().any(|action| wanted.contains(action));

    w.write_line("Terraform used the selected providers to generate the following execution");
    w.write_line("plan. Resource actions are indicated with the following symbols:");
    if any(&[Action::Create, Action::Replace]) {
        w.write("  ");
        w.write_styled("+", &[Style::Green]);
        w.write_line(" create");
    }
    if any(&[Action::Update]) {
        w.write("  ");
        w.write_styled("~", &[Style::Yellow]);
        w.write_line(" update in-place");
    }
    if any(&[Action::Delete, Action::Replace]) {
        w.write("  ");
        w.write_styled("-", &[Style::Red]);
        w.write_line(" destroy");
    }
    if any(&[Action::Replace]) {
        w.write_styled("-", &[Style::Red]);
        w.write("/");
        w.write_styled("+", &[Style::Green]);
        w.write_line(" destroy and then create replacement");
    }
    if any(&[Action::Read]) {
        w.write(" ");
        w.write_styled("<=", &[Style::Cyan]);
        w.write_line(" read (data resources)");
    }
    w.newline();
}

fn render_resource(w: &mut AnsiWriter, rc: &ResourceChange, action: Action) {
    w.write_styled(&format!("  # {}", rc.address), &[Style::Bold]);
    match action {
        Action::Create => w.write_line(" will be created"),
        Action::Update => w.write_line(" will be updated in-place"),
        Action::Read => w.write_line(" will be read during apply"),
        Action::Delete => {
            w.write(" will be ");
            w.write_line_styled("destroyed", &[Style::Bold, Style::Red]);
        }
        Action::Replace => {
            w.write(" must be ");
            w.write_line_styled("replaced", &[Style::Bold, Style::Red]);
        }
        Action::NoOp | Action::Unknown => w.write_line(" will be changed"),
    }
    if let Some(note) = action_reason_note(rc) {
        w.write_line(&format!("  # ({note})"));
    }

    // The marker width varies, so the leading indent shrinks to keep the
    // resource keyword in the same column.
    let lead = match action {
        Action::Replace => "",
        Action::Read => " ",
        _ => "  ",
    };
    w.write(lead);
    match action {
        Action::Create => w.write_styled("+", &[Style::Green]),
        Action::Update => w.write_styled("~", &[Style::Yellow]),
        Action::Delete => w.write_styled("-", &[Style::Red]),
        Action::Read => w.write_styled("<=", &[Style::Cyan]),
        Action::Replace => {
            w.write_styled("-", &[Style::Red]);
            w.write("/");
            w.write_styled("+", &[Style::Green]);
        }
        Action::NoOp | Action::Unknown => w.write("~"),
    }
    w.write_reset();
    w.write(" ");
    let keyword = if rc.mode == "data" { "data" } else { "resource" };
    w.write_line(&format!(
        "{keyword} \"{}\" \"{}\" {{",
        rc.resource_type, rc.name
    ));

    let change = &rc.change;
    let sensitive = match action {
        Action::Delete => change.before_sensitive.as_ref(),
        _ => change
            .after_sensitive
            .as_ref()
            .or(change.before_sensitive.as_ref()),
    };
    let replace_paths = path::collect_replace_paths(change.replace_paths.as_ref());
    render_attributes(
        w,
        change.before.as_ref(),
        change.after.as_ref(),
        change.after_unknown.as_ref(),
        sensitive,
        &replace_paths,
        action,
        1,
    );
    w.write_line("    }");
    w.newline();
}

fn action_reason_note(rc: &ResourceChange) -> Option<String> {
    match rc.action_reason.as_deref() {
        Some("replace_because_tainted") => Some("is tainted, so must be replaced".to_string()),
        Some("replace_by_request") => Some("requested replacement".to_string()),
        Some("delete_because_no_resource_config") => {
            Some(format!("because {} is not in configuration", rc.address))
        }
        _ => None,
    }
}

fn render_summary(w: &mut AnsiWriter, actions: &[Action]) {
    let count = |wanted: &[Action]| {
        actions
            .iter()
            .filter(|action| wanted.contains(action))
            .count()
    };
    let add = count(&[Action::Create, Action::Replace]);
    let change = count(&[Action::Update]);
    let destroy = count(&[Action::Delete, Action::Replace]);
    w.write_styled("Plan:", &[Style::Bold]);
    w.write_line(&format!(
        " {add} to add, {change} to change, {destroy} to destroy."
    ));
}

struct OutputChange {
    name: String,
    action: Action,
    before: Value,
    after: Value,
    unknown: bool,
    sensitive: bool,
}

fn collect_output_changes(outputs: Option<&Value>) -> Vec<OutputChange> {
    let Some(Value::Object(entries)) = outputs else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|(name, change)| {
            let actions: Vec<String> = match change.get("actions") {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            let flag = |key: &str| {
                matches!(change.get(key), Some(Value::Bool(true)))
            };
            OutputChange {
                name: name.clone(),
                action: map_actions(&actions),
                before: change.get("before").cloned().unwrap_or(Value::Null),
                after: change.get("after").cloned().unwrap_or(Value::Null),
                unknown: flag("after_unknown"),
                sensitive: flag("after_sensitive") || flag("before_sensitive"),
            }
        })
        .collect()
}

fn render_output_changes(w: &mut AnsiWriter, outputs: &[OutputChange]) {
    // The name column aligns across every output, changed or not.
    let width = outputs
        .iter()
        .map(|output| output.name.chars().count())
        .max()
        .unwrap_or(0);

    w.write_line("Changes to Outputs:");
    for output in outputs {
        let after_text = if output.unknown {
            "(known after apply)".to_string()
        } else if output.sensitive {
            "(sensitive value)".to_string()
        } else {
            render_inline(&output.after)
        };
        match output.action {
            Action::Create => write_scalar_line(
                w,
                1,
                "+",
                Style::Green,
                &output.name,
                &after_text,
                false,
                false,
                width,
            ),
            Action::Delete => {
                let before_text = if output.sensitive {
                    "(sensitive value)".to_string()
                } else {
                    render_inline(&output.before)
                };
                write_scalar_line(
                    w,
                    1,
                    "-",
                    Style::Red,
                    &output.name,
                    &before_text,
                    true,
                    false,
                    width,
                );
            }
            Action::Update | Action::Replace => {
                let before_text = if output.sensitive {
                    "(sensitive value)".to_string()
                } else {
                    render_inline(&output.before)
                };
                write_arrow_line(w, 1, &output.name, &before_text, &after_text, false, width);
            }
            Action::NoOp | Action::Read | Action::Unknown => {}
        }
    }
}
