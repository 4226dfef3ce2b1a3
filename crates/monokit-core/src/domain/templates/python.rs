//! `backend-python`: a Flask or FastAPI service.
//!
//! The generated `package.json` only carries script shims so the app takes
//! part in `pnpm --filter` like every other workspace member.

use serde_json::json;

use super::{FileTemplate, RenderContext, TemplateDescriptor, node, pretty_json};
use crate::domain::{
    entities::app_request::Archetype,
    value_objects::{ArchetypeKind, PythonFramework},
};

pub(super) fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor {
        kind: ArchetypeKind::BackendPython,
        directories: node::DIRECTORIES.to_vec(),
        files: vec![
            FileTemplate::new("package.json", package_json),
            FileTemplate::new("requirements.txt", requirements),
            FileTemplate::new("README.md", readme),
            FileTemplate::new(".gitignore", gitignore),
            FileTemplate::new("src/__init__.py", |_| String::new()),
            FileTemplate::new("src/main.py", main),
            FileTemplate::new("src/config/settings.py", settings),
            FileTemplate::new("src/routes/health.py", routes),
            FileTemplate::new("src/services/health_service.py", service),
            FileTemplate::new("tests/test_health.py", health_test),
        ],
    }
}

fn framework(ctx: &RenderContext) -> PythonFramework {
    match ctx.archetype() {
        Archetype::BackendPython { framework, .. } => *framework,
        _ => PythonFramework::default(),
    }
}

fn by_framework(ctx: &RenderContext, flask: &str, fastapi: &str) -> String {
    ctx.render(match framework(ctx) {
        PythonFramework::Flask => flask,
        PythonFramework::FastApi => fastapi,
    })
}

fn package_json(ctx: &RenderContext) -> String {
    let dev = match framework(ctx) {
        PythonFramework::Flask => ctx.render("python -m flask --app src.main run --port {{PORT}} --debug"),
        PythonFramework::FastApi => ctx.render("python -m uvicorn src.main:app --reload --port {{PORT}}"),
    };
    pretty_json(&json!({
        "name": ctx.app_name(),
        "version": "0.1.0",
        "private": true,
        "scripts": {
            "setup": "python -m pip install -r requirements.txt",
            "dev": dev,
            "build": "python -m compileall -q src",
            "test": "python -m pytest"
        }
    }))
}

fn requirements(ctx: &RenderContext) -> String {
    by_framework(
        ctx,
        "flask==3.1.0\npytest==8.3.4\n",
        "fastapi==0.115.6\nuvicorn[standard]==0.34.0\nhttpx==0.28.1\npytest==8.3.4\n",
    )
}

fn readme(ctx: &RenderContext) -> String {
    ctx.render(
        "# {{APP_TITLE}}

Python API built with {{FRAMEWORK}}.

## Development

```bash
python -m venv .venv
source .venv/bin/activate
pnpm --filter {{APP_NAME}} setup
pnpm dev:{{APP_NAME}}
```

The server listens on http://localhost:{{PORT}} (override with `PORT`).

## Endpoints

- `GET /health`: service status

## Tests

```bash
pnpm test:{{APP_NAME}}
```
",
    )
}

fn gitignore(_ctx: &RenderContext) -> String {
    "__pycache__/\n*.pyc\n.venv/\n.pytest_cache/\n.env\n".to_string()
}

fn main(ctx: &RenderContext) -> String {
    by_framework(
        ctx,
        r#"from flask import Flask

from src.config.settings import settings
from src.routes.health import health_bp


def create_app() -> Flask:
    app = Flask(__name__)
    app.register_blueprint(health_bp)
    return app


app = create_app()

if __name__ == "__main__":
    app.run(host="0.0.0.0", port=settings.port)
"#,
        r#"import uvicorn
from fastapi import FastAPI

from src.config.settings import settings
from src.routes.health import router as health_router

app = FastAPI(title="{{APP_TITLE}}")
app.include_router(health_router)

if __name__ == "__main__":
    uvicorn.run("src.main:app", host="0.0.0.0", port=settings.port, reload=True)
"#,
    )
}

fn settings(ctx: &RenderContext) -> String {
    ctx.render(
        r#"import os
from dataclasses import dataclass, field


@dataclass(frozen=True)
class Settings:
    app_name: str = "{{APP_NAME}}"
    port: int = field(default_factory=lambda: int(os.getenv("PORT", "{{PORT}}")))
    env: str = field(default_factory=lambda: os.getenv("APP_ENV", "development"))


settings = Settings()
"#,
    )
}

fn routes(ctx: &RenderContext) -> String {
    by_framework(
        ctx,
        r#"from flask import Blueprint, jsonify

from src.services.health_service import get_health_status

health_bp = Blueprint("health", __name__)


@health_bp.get("/health")
def health():
    return jsonify(get_health_status())
"#,
        r#"from fastapi import APIRouter

from src.services.health_service import get_health_status

router = APIRouter()


@router.get("/health")
def health() -> dict:
    return get_health_status()
"#,
    )
}

fn service(ctx: &RenderContext) -> String {
    ctx.render(
        r#"import time

from src.config.settings import settings

_STARTED = time.monotonic()


def get_health_status() -> dict:
    return {
        "status": "ok",
        "service": settings.app_name,
        "uptime": round(time.monotonic() - _STARTED, 3),
    }
"#,
    )
}

fn health_test(ctx: &RenderContext) -> String {
    by_framework(
        ctx,
        r#"from src.main import create_app


def test_health_returns_ok():
    client = create_app().test_client()
    response = client.get("/health")
    assert response.status_code == 200
    assert response.get_json()["status"] == "ok"
"#,
        r#"from fastapi.testclient import TestClient

from src.main import app


def test_health_returns_ok():
    client = TestClient(app)
    response = client.get("/health")
    assert response.status_code == 200
    assert response.json()["status"] == "ok"
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        GeneratedTree,
        entities::app_request::{AppName, AppRequest},
        value_objects::Port,
    };

    fn render(framework: PythonFramework, port: Port) -> GeneratedTree {
        let request = AppRequest::new(
            AppName::parse("ml-service").unwrap(),
            Archetype::BackendPython { framework, port },
        );
        descriptor()
            .render(&RenderContext::new(&request), "/ws/apps/ml-service")
            .unwrap()
    }

    #[test]
    fn lists_the_python_layout() {
        let tree = render(PythonFramework::Flask, Port::Auto);
        let paths: Vec<String> = tree.files().map(|f| f.path.to_slash_string()).collect();
        assert_eq!(
            paths,
            [
                "package.json",
                "requirements.txt",
                "README.md",
                ".gitignore",
                "src/__init__.py",
                "src/main.py",
                "src/config/settings.py",
                "src/routes/health.py",
                "src/services/health_service.py",
                "tests/test_health.py",
            ]
        );
        assert!(tree.file("src/__init__.py").unwrap().content.is_empty());
    }

    #[test]
    fn flask_and_fastapi_differ() {
        let flask = render(PythonFramework::Flask, Port::Auto);
        assert!(flask.file("requirements.txt").unwrap().content.starts_with("flask=="));
        assert!(flask.file("src/main.py").unwrap().content.contains("def create_app"));

        let fastapi = render(PythonFramework::FastApi, Port::Auto);
        let reqs = &fastapi.file("requirements.txt").unwrap().content;
        assert!(reqs.contains("fastapi==") && reqs.contains("uvicorn"));
        assert!(fastapi.file("src/routes/health.py").unwrap().content.contains("APIRouter"));
    }

    #[test]
    fn package_shim_runs_on_resolved_port() {
        let tree = render(PythonFramework::FastApi, Port::Fixed(9001));
        let pkg: serde_json::Value =
            serde_json::from_str(&tree.file("package.json").unwrap().content).unwrap();
        assert_eq!(
            pkg["scripts"]["dev"],
            "python -m uvicorn src.main:app --reload --port 9001"
        );

        let auto = render(PythonFramework::Flask, Port::Auto);
        let settings = &auto.file("src/config/settings.py").unwrap().content;
        assert!(settings.contains(r#"os.getenv("PORT", "8000")"#));
    }
}
