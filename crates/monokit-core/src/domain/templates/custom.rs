//! `custom`: a minimal skeleton for apps that fit no other archetype.

use serde_json::json;

use super::{FileTemplate, RenderContext, TemplateDescriptor, pretty_json};
use crate::domain::value_objects::ArchetypeKind;

pub(super) fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor {
        kind: ArchetypeKind::Custom,
        directories: vec!["src", "tests"],
        files: vec![
            FileTemplate::new("package.json", package_json),
            FileTemplate::new("README.md", readme),
            FileTemplate::new(".gitignore", |_| "node_modules/\ndist/\n.env\n".to_string()),
            FileTemplate::new("src/index.js", index),
        ],
    }
}

fn package_json(ctx: &RenderContext) -> String {
    pretty_json(&json!({
        "name": ctx.app_name(),
        "version": "0.1.0",
        "private": true,
        "type": "module",
        "scripts": {
            "dev": "node --watch src/index.js",
            "build": "node --check src/index.js",
            "start": "node src/index.js",
            "test": "node --test tests/"
        }
    }))
}

fn readme(ctx: &RenderContext) -> String {
    ctx.render(
        "# {{APP_TITLE}}

Custom application. Replace this skeleton with the real implementation.

```bash
pnpm dev:{{APP_NAME}}
```
",
    )
}

fn index(ctx: &RenderContext) -> String {
    ctx.render(
        "const port = Number(process.env.PORT ?? {{PORT}});

console.log(`{{APP_NAME}} ready (port ${port})`);
",
    )
}
