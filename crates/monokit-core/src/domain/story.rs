//! Story drafts.
//!
//! A story is a markdown planning document with YAML front-matter. Two kinds
//! exist: the draft written after an app is scaffolded, and free-form stories
//! created on demand. Both are later filled in by external tooling.

use crate::domain::{
    ArchetypeKind, DomainError,
    entities::app_request::{AppName, AppRequest},
};

/// Where a free-form story lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryScope {
    /// Workspace-wide story under the shared stories directory.
    Shared,
    /// Story owned by one app, under `<apps>/<app>/docs/stories`.
    App(AppName),
}

impl StoryScope {
    /// Empty input and the literal `shared` both mean workspace-wide.
    ///
    /// Anything else must be a valid app name, so the scope can never point
    /// outside the apps directory.
    pub fn from_input(app: &str) -> Result<Self, DomainError> {
        let app = app.trim();
        if app.is_empty() || app == "shared" {
            Ok(Self::Shared)
        } else {
            AppName::parse(app).map(Self::App)
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Shared => "shared",
            Self::App(name) => name.as_str(),
        }
    }
}

/// Input for a free-form story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    pub title: String,
    pub scope: StoryScope,
    pub overview: Option<String>,
}

/// Lower-case the title and collapse every non-alphanumeric run into `-`.
pub fn story_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Identifier of the story written for a freshly scaffolded app.
pub fn app_story_id(request: &AppRequest) -> String {
    format!("add-{}-app", request.name())
}

fn front_matter(id: &str, title: &str, app: &str, date: &str) -> String {
    format!("---\nid: {id}\ntitle: {title}\napp: {app}\nstatus: draft\ncreated: {date}\n---\n\n")
}

/// Render a free-form story.
pub fn render_story(draft: &StoryDraft, date: &str) -> String {
    let id = story_slug(&draft.title);
    let overview = draft
        .overview
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .unwrap_or("Brief description of what this story accomplishes.");

    let mut out = front_matter(&id, &draft.title, draft.scope.label(), date);
    out.push_str(&format!("# {}\n\n## Overview\n\n{overview}\n\n", draft.title));
    out.push_str(STORY_BODY);
    out
}

/// Render the draft story describing a scaffolded app.
pub fn render_app_story(request: &AppRequest, date: &str) -> String {
    let name = request.name().as_str();
    let archetype = request.archetype();
    let kind = archetype.kind();
    let label = kind.label();
    let framework = archetype.framework_name().unwrap_or("none");
    let port = archetype
        .port()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "n/a".into());
    let language = archetype
        .language()
        .map(|l| l.language_name())
        .unwrap_or(if kind == ArchetypeKind::BackendPython {
            "Python"
        } else {
            "JavaScript"
        });

    let layout = if kind.is_backend() {
        "  - routes/ (API endpoint definitions)\n  - controllers/ (request/response handling)\n  - services/ (business logic)\n  - models/ (data types)\n  - middleware/ (auth, logging, etc.)\n  - utils/ (helpers)\n  - config/ (configuration)\n"
    } else {
        "  - components/ (UI components)\n  - hooks/ (custom React hooks)\n  - utils/ (helper functions)\n  - pages/ or app/ (routing)\n"
    };
    let check = if kind.is_backend() {
        "Health endpoint returns 200 OK"
    } else {
        "Welcome page renders"
    };

    let title = format!("Add {name} {label}");
    let mut out = front_matter(&app_story_id(request), &title, name, date);
    out.push_str(&format!("# {title}\n\n## Overview\n\n"));
    out.push_str(&format!(
        "Scaffolded {label} application \"{name}\" in the monorepo.\n\n"
    ));
    out.push_str("**Requirements:**\n");
    out.push_str(&format!("- **Type**: {label}\n"));
    out.push_str(&format!("- **Framework**: {framework}\n"));
    out.push_str(&format!("- **Port**: {port}\n"));
    out.push_str(&format!("- **Language**: {language}\n\n"));
    out.push_str("## User Story\n\nAs a developer,\n");
    out.push_str(&format!("I want a new {label} app called \"{name}\",\n"));
    out.push_str("So that I can start building features following project conventions.\n\n");
    out.push_str("## Acceptance Criteria\n\n");
    out.push_str(&format!(
        "- [ ] App lives in `apps/{name}/` following `docs/project-context.md`\n"
    ));
    out.push_str("- [ ] Dependency versions reviewed and pinned to current stable releases\n");
    out.push_str("- [ ] Modular architecture in place:\n");
    out.push_str(layout);
    out.push_str(&format!("- [ ] {check}\n"));
    out.push_str(&format!(
        "- [ ] Root package.json has `dev:{name}`, `build:{name}`, `test:{name}` scripts\n"
    ));
    out.push_str("- [ ] App starts without errors\n\n");
    out.push_str("## Tasks\n\n");
    out.push_str(&format!("- [ ] Review versions for {framework}\n"));
    out.push_str("- [ ] Install dependencies: `pnpm install`\n");
    out.push_str(&format!("- [ ] Verify app starts: `pnpm dev:{name}`\n"));
    out.push_str("- [ ] Add first feature module\n\n");
    out.push_str("## Notes\n\n- Follow conventions from `docs/project-context.md`\n");
    out
}

const STORY_BODY: &str = "## User Story

As a [user role],
I want to [action],
So that [benefit].

## Acceptance Criteria

- [ ] Criterion 1
- [ ] Criterion 2
- [ ] Criterion 3

## Technical Design

### Approach

Describe the technical approach here.

### Implementation Details

- **Files to create/modify**:
- **Dependencies**:
- **API endpoints** (if applicable):
- **Database changes** (if applicable):

## Tasks

- [ ] Task 1: Setup
- [ ] Task 2: Implementation
- [ ] Task 3: Testing
- [ ] Task 4: Documentation

## Testing

### Manual Testing

- [ ] Test case 1
- [ ] Test case 2

### Automated Testing

- [ ] Unit tests
- [ ] Integration tests

## Dependencies

List any prerequisite stories or external dependencies.

## Notes

Additional context, edge cases, or considerations.

## References

- Link to PRD
- Link to design
- Link to related stories
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::app_request::Archetype;

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(story_slug("Add Login Flow"), "add-login-flow");
        assert_eq!(story_slug("  --Hello,  World!!  "), "hello-world");
        assert_eq!(story_slug("OAuth2 / SSO"), "oauth2-sso");
        assert_eq!(story_slug("!!!"), "");
    }

    #[test]
    fn scope_from_input() {
        assert_eq!(StoryScope::from_input("").unwrap(), StoryScope::Shared);
        assert_eq!(StoryScope::from_input("shared").unwrap(), StoryScope::Shared);
        assert_eq!(
            StoryScope::from_input(" api ").unwrap(),
            StoryScope::App(AppName::parse("api").unwrap())
        );
    }

    #[test]
    fn scope_rejects_paths_and_invalid_names() {
        for input in ["../x", "../../outside", "Web", "apps/web", "/tmp"] {
            assert!(
                matches!(
                    StoryScope::from_input(input),
                    Err(DomainError::InvalidAppName { .. })
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn free_form_story_has_front_matter() {
        let draft = StoryDraft {
            title: "Add Login Flow".into(),
            scope: StoryScope::App(AppName::parse("web").unwrap()),
            overview: None,
        };
        let text = render_story(&draft, "2026-03-01");
        assert!(text.starts_with("---\nid: add-login-flow\n"));
        assert!(text.contains("app: web\n"));
        assert!(text.contains("created: 2026-03-01\n"));
        assert!(text.contains("Brief description of what this story accomplishes."));
        assert!(text.contains("## References"));
    }

    #[test]
    fn app_story_describes_request() {
        let request = AppRequest::new(
            AppName::parse("billing").unwrap(),
            Archetype::default_for(ArchetypeKind::BackendPython),
        );
        let text = render_app_story(&request, "2026-03-01");
        assert!(text.starts_with("---\nid: add-billing-app\n"));
        assert!(text.contains("- **Framework**: flask\n"));
        assert!(text.contains("- **Language**: Python\n"));
        assert!(text.contains("routes/ (API endpoint definitions)"));
        assert!(text.contains("`dev:billing`"));
    }
}
