//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module when the error
//! carries enough context to name the offending entity.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::EntityNotFound => suggest_entity_not_found(context),
        ErrorCode::DanglingReference => suggest_dangling_reference(context),
        ErrorCode::ConfigMissingRequired => suggest_config_missing_required(context),
        _ => code.suggestion().to_string(),
    }
}

fn context_str<'a>(context: Option<&'a Value>, key: &str) -> Option<&'a str> {
    context.and_then(|c| c.get(key)).and_then(Value::as_str)
}

fn suggest_entity_not_found(context: Option<&Value>) -> String {
    match (context_str(context, "kind"), context_str(context, "id")) {
        (Some(kind), Some(id)) => format!(
            "No {kind} with id '{id}'. Run `currmap list {kind}` to see the ids in the store"
        ),
        _ => ErrorCode::EntityNotFound.suggestion().to_string(),
    }
}

fn suggest_dangling_reference(context: Option<&Value>) -> String {
    match context_str(context, "skill_id") {
        Some(skill_id) => format!(
            "Skill '{skill_id}' is referenced but not defined. Add it to the skills list of a batch and run `currmap ingest`, or unset `store.strict_references`"
        ),
        None => ErrorCode::DanglingReference.suggestion().to_string(),
    }
}

fn suggest_config_missing_required(context: Option<&Value>) -> String {
    match context_str(context, "config_key") {
        Some(key) => format!("Set `{key}` in config.toml or via its CURRMAP_* environment variable"),
        None => ErrorCode::ConfigMissingRequired.suggestion().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn not_found_names_kind_and_id() {
        let ctx = json!({ "kind": "course", "id": "CS101" });
        let suggestion = suggest_for_error(ErrorCode::EntityNotFound, Some(&ctx));
        assert!(suggestion.contains("CS101"));
        assert!(suggestion.contains("currmap list course"));
    }

    #[test]
    fn dangling_reference_names_skill() {
        let ctx = json!({ "skill_id": "SKILL42" });
        let suggestion = suggest_for_error(ErrorCode::DanglingReference, Some(&ctx));
        assert!(suggestion.contains("SKILL42"));
    }

    #[test]
    fn falls_back_to_static_suggestion() {
        assert_eq!(
            suggest_for_error(ErrorCode::EntityNotFound, None),
            ErrorCode::EntityNotFound.suggestion()
        );
        assert_eq!(
            suggest_for_error(ErrorCode::IoError, Some(&json!({}))),
            ErrorCode::IoError.suggestion()
        );
    }
}
