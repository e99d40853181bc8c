//! Usage rendering
//!
//! Pure functions over the registry; callers decide what exit code follows.

use crate::cli::registry::{ActionSpec, FlagSpec, OVERVIEW, Registry};
use crate::config::AppContext;
use std::fmt::Write as _;

/// Tool-wide usage: overview, every action and every flag
#[must_use]
pub fn render_usage(registry: &Registry, context: &AppContext) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Usage: {} <optional flags> <action> [dependencies...] <optional flags>",
        context.program
    );
    out.push('\n');
    push_indented(&mut out, OVERVIEW, 0);
    out.push_str("\nActions:\n");
    for spec in registry.actions() {
        push_action(&mut out, spec);
    }
    push_flags(&mut out, registry);
    out
}

/// Usage for a single action, followed by the global flags
#[must_use]
pub fn render_action_usage(registry: &Registry, spec: &ActionSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Usage: `{}`", spec.usage);
    out.push('\n');
    push_action(&mut out, spec);
    push_flags(&mut out, registry);
    out
}

/// Usage for `help [topic]`: the topic's action usage when it names an
/// action, tool-wide usage otherwise
#[must_use]
pub fn render_help(registry: &Registry, context: &AppContext, topic: Option<&str>) -> String {
    topic
        .and_then(|topic| registry.action(&topic.to_lowercase()))
        .map_or_else(
            || render_usage(registry, context),
            |spec| render_action_usage(registry, spec),
        )
}

fn push_action(out: &mut String, spec: &ActionSpec) {
    let _ = writeln!(out, "  {}", spec.identifiers.join(", "));
    push_indented(out, spec.summary, 4);
    let _ = writeln!(out, "    Usage: `{}`", spec.usage);
}

fn push_flags(out: &mut String, registry: &Registry) {
    out.push_str("\nFlags:\n");
    for spec in registry.flags() {
        push_flag(out, spec);
    }
}

fn push_flag(out: &mut String, spec: &FlagSpec) {
    let value = if spec.takes_value() { " <value>" } else { "" };
    let _ = writeln!(out, "  {}{value}", spec.identifiers.join(", "));
    push_indented(out, spec.help, 4);
    let _ = writeln!(out, "    Usage: `{}`", spec.usage);
}

fn push_indented(out: &mut String, text: &str, indent: usize) {
    for line in text.lines() {
        let _ = writeln!(out, "{:indent$}{}", "", line.trim());
    }
}
