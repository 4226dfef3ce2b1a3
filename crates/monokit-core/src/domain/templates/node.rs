//! `backend-node`: an HTTP service on Express, Fastify or Hono.
//!
//! Sources use ES modules with `.js` import specifiers so the same imports
//! resolve under plain Node and under TypeScript's `NodeNext` resolution.

use serde_json::{Map, Value, json};

use super::{ContentProducer, FileTemplate, RenderContext, TemplateDescriptor, pretty_json};
use crate::domain::{
    entities::app_request::Archetype,
    value_objects::{ArchetypeKind, LanguageMode, NodeFramework},
};

pub(super) const DIRECTORIES: [&str; 9] = [
    "src",
    "src/routes",
    "src/controllers",
    "src/services",
    "src/models",
    "src/middleware",
    "src/utils",
    "src/config",
    "tests",
];

pub(super) fn descriptor(language: LanguageMode) -> TemplateDescriptor {
    let ext = language.extension();
    let mut files = vec![
        FileTemplate::new("package.json", package_json),
        FileTemplate::new("README.md", readme),
        FileTemplate::new(".gitignore", gitignore),
    ];
    if language.is_typed() {
        files.push(FileTemplate::new("tsconfig.json", tsconfig));
    }

    let sources: [(&str, ContentProducer); 8] = [
        ("src/index", index),
        ("src/config/index", config),
        ("src/routes/health", routes),
        ("src/controllers/health-controller", controller),
        ("src/services/health-service", service),
        ("src/middleware/request-logger", middleware),
        ("src/utils/logger", logger),
        ("tests/health.test", health_test),
    ];
    files.extend(
        sources
            .into_iter()
            .map(|(stem, produce)| FileTemplate::new(format!("{stem}.{ext}"), produce)),
    );

    TemplateDescriptor {
        kind: ArchetypeKind::BackendNode,
        directories: DIRECTORIES.to_vec(),
        files,
    }
}

fn framework(ctx: &RenderContext) -> NodeFramework {
    match ctx.archetype() {
        Archetype::BackendNode { framework, .. } => *framework,
        _ => NodeFramework::default(),
    }
}

fn pick(ctx: &RenderContext, typed: &str, untyped: &str) -> String {
    ctx.render(if ctx.is_typed() { typed } else { untyped })
}

fn object(pairs: &[(&str, &str)]) -> Value {
    Value::Object(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
            .collect::<Map<_, _>>(),
    )
}

fn package_json(ctx: &RenderContext) -> String {
    let fw = framework(ctx);
    let typed = ctx.is_typed();

    let scripts = if typed {
        object(&[
            ("dev", "tsx watch src/index.ts"),
            ("build", "tsc -p tsconfig.json"),
            ("start", "node dist/index.js"),
            ("test", "node --import tsx --test tests/*.test.ts"),
            ("typecheck", "tsc --noEmit"),
        ])
    } else {
        object(&[
            ("dev", "node --watch src/index.js"),
            ("build", "node --check src/index.js"),
            ("start", "node src/index.js"),
            ("test", "node --test tests/"),
        ])
    };

    let dependencies = match fw {
        NodeFramework::Express => object(&[("express", "^4.21.2")]),
        NodeFramework::Fastify => object(&[("fastify", "^5.2.1")]),
        NodeFramework::Hono => object(&[("@hono/node-server", "^1.13.7"), ("hono", "^4.6.16")]),
    };

    let mut doc = json!({
        "name": ctx.app_name(),
        "version": "0.1.0",
        "private": true,
        "type": "module",
        "scripts": scripts,
        "dependencies": dependencies,
    });

    if typed {
        let mut dev = vec![("@types/node", "^22.10.5")];
        if fw == NodeFramework::Express {
            dev.push(("@types/express", "^5.0.0"));
        }
        dev.extend([("tsx", "^4.19.2"), ("typescript", "^5.7.3")]);
        if let Value::Object(map) = &mut doc {
            map.insert("devDependencies".into(), object(&dev));
        }
    }

    pretty_json(&doc)
}

fn tsconfig(_ctx: &RenderContext) -> String {
    pretty_json(&json!({
        "compilerOptions": {
            "target": "ES2022",
            "module": "NodeNext",
            "moduleResolution": "NodeNext",
            "outDir": "dist",
            "rootDir": "src",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true
        },
        "include": ["src"]
    }))
}

fn readme(ctx: &RenderContext) -> String {
    ctx.render(
        "# {{APP_TITLE}}

Node.js API built with {{FRAMEWORK}}.

## Development

```bash
pnpm install
pnpm dev:{{APP_NAME}}
```

The server listens on http://localhost:{{PORT}} (override with `PORT`).

## Endpoints

- `GET /health`: service status

## Layout

```
src/
  index.{{EXT}}      entry point
  routes/       endpoint definitions
  controllers/  request and response handling
  services/     business logic
  models/       data types
  middleware/   cross-cutting request handling
  utils/        helpers
  config/       configuration
tests/
```
",
    )
}

fn gitignore(_ctx: &RenderContext) -> String {
    "node_modules/\ndist/\ncoverage/\n.env\n*.log\n".to_string()
}

fn index(ctx: &RenderContext) -> String {
    let source = match framework(ctx) {
        NodeFramework::Express => EXPRESS_INDEX,
        NodeFramework::Fastify => FASTIFY_INDEX,
        NodeFramework::Hono => HONO_INDEX,
    };
    ctx.render(source)
}

fn config(ctx: &RenderContext) -> String {
    ctx.render(
        "export const config = {
  port: Number(process.env.PORT ?? {{PORT}}),
  env: process.env.NODE_ENV ?? 'development',
};
",
    )
}

fn routes(ctx: &RenderContext) -> String {
    match framework(ctx) {
        NodeFramework::Express => ctx.render(EXPRESS_ROUTES),
        NodeFramework::Fastify => pick(ctx, FASTIFY_ROUTES_TS, FASTIFY_ROUTES_JS),
        NodeFramework::Hono => ctx.render(HONO_ROUTES),
    }
}

fn controller(ctx: &RenderContext) -> String {
    match framework(ctx) {
        NodeFramework::Express => pick(ctx, EXPRESS_CONTROLLER_TS, EXPRESS_CONTROLLER_JS),
        NodeFramework::Fastify => pick(ctx, FASTIFY_CONTROLLER_TS, FASTIFY_CONTROLLER_JS),
        NodeFramework::Hono => pick(ctx, HONO_CONTROLLER_TS, HONO_CONTROLLER_JS),
    }
}

fn middleware(ctx: &RenderContext) -> String {
    match framework(ctx) {
        NodeFramework::Express => pick(ctx, EXPRESS_MIDDLEWARE_TS, EXPRESS_MIDDLEWARE_JS),
        NodeFramework::Fastify => pick(ctx, FASTIFY_MIDDLEWARE_TS, FASTIFY_MIDDLEWARE_JS),
        NodeFramework::Hono => pick(ctx, HONO_MIDDLEWARE_TS, HONO_MIDDLEWARE_JS),
    }
}

fn service(ctx: &RenderContext) -> String {
    pick(
        ctx,
        "export interface HealthStatus {
  status: 'ok';
  service: string;
  uptime: number;
}

export function getHealthStatus(): HealthStatus {
  return { status: 'ok', service: '{{APP_NAME}}', uptime: process.uptime() };
}
",
        "export function getHealthStatus() {
  return { status: 'ok', service: '{{APP_NAME}}', uptime: process.uptime() };
}
",
    )
}

fn logger(ctx: &RenderContext) -> String {
    pick(
        ctx,
        "type Level = 'info' | 'warn' | 'error';
type Meta = Record<string, unknown>;

function write(level: Level, message: string, meta: Meta = {}): void {
  const line = JSON.stringify({ time: new Date().toISOString(), level, message, ...meta });
  if (level === 'info') console.log(line);
  else console[level](line);
}

export const logger = {
  info: (message: string, meta?: Meta) => write('info', message, meta),
  warn: (message: string, meta?: Meta) => write('warn', message, meta),
  error: (message: string, meta?: Meta) => write('error', message, meta),
};
",
        "function write(level, message, meta = {}) {
  const line = JSON.stringify({ time: new Date().toISOString(), level, message, ...meta });
  if (level === 'info') console.log(line);
  else console[level](line);
}

export const logger = {
  info: (message, meta) => write('info', message, meta),
  warn: (message, meta) => write('warn', message, meta),
  error: (message, meta) => write('error', message, meta),
};
",
    )
}

fn health_test(ctx: &RenderContext) -> String {
    ctx.render(
        "import assert from 'node:assert/strict';
import { test } from 'node:test';
import { getHealthStatus } from '../src/services/health-service.js';

test('health status reports ok', () => {
  const health = getHealthStatus();
  assert.equal(health.status, 'ok');
  assert.equal(health.service, '{{APP_NAME}}');
});
",
    )
}

// ── Express ──────────────────────────────────────────────────────────────────

const EXPRESS_INDEX: &str = "import express from 'express';
import { config } from './config/index.js';
import { requestLogger } from './middleware/request-logger.js';
import healthRoutes from './routes/health.js';
import { logger } from './utils/logger.js';

const app = express();

app.use(express.json());
app.use(requestLogger);
app.use('/health', healthRoutes);

app.listen(config.port, () => {
  logger.info('{{APP_NAME}} listening', { port: config.port });
});

export default app;
";

const EXPRESS_ROUTES: &str = "import { Router } from 'express';
import { healthCheck } from '../controllers/health-controller.js';

const router = Router();

router.get('/', healthCheck);

export default router;
";

const EXPRESS_CONTROLLER_TS: &str = "import type { Request, Response } from 'express';
import { getHealthStatus } from '../services/health-service.js';

export function healthCheck(_req: Request, res: Response): void {
  res.json(getHealthStatus());
}
";

const EXPRESS_CONTROLLER_JS: &str = "import { getHealthStatus } from '../services/health-service.js';

export function healthCheck(_req, res) {
  res.json(getHealthStatus());
}
";

const EXPRESS_MIDDLEWARE_TS: &str = "import type { NextFunction, Request, Response } from 'express';
import { logger } from '../utils/logger.js';

export function requestLogger(req: Request, res: Response, next: NextFunction): void {
  const started = Date.now();
  res.on('finish', () => {
    logger.info('request', {
      method: req.method,
      path: req.originalUrl,
      status: res.statusCode,
      ms: Date.now() - started,
    });
  });
  next();
}
";

const EXPRESS_MIDDLEWARE_JS: &str = "import { logger } from '../utils/logger.js';

export function requestLogger(req, res, next) {
  const started = Date.now();
  res.on('finish', () => {
    logger.info('request', {
      method: req.method,
      path: req.originalUrl,
      status: res.statusCode,
      ms: Date.now() - started,
    });
  });
  next();
}
";

// ── Fastify ──────────────────────────────────────────────────────────────────

const FASTIFY_INDEX: &str = "import Fastify from 'fastify';
import { config } from './config/index.js';
import { registerRequestLogger } from './middleware/request-logger.js';
import { healthRoutes } from './routes/health.js';
import { logger } from './utils/logger.js';

const app = Fastify();

registerRequestLogger(app);
await app.register(healthRoutes, { prefix: '/health' });

await app.listen({ port: config.port, host: '0.0.0.0' });
logger.info('{{APP_NAME}} listening', { port: config.port });

export default app;
";

const FASTIFY_ROUTES_TS: &str = "import type { FastifyInstance } from 'fastify';
import { healthCheck } from '../controllers/health-controller.js';

export async function healthRoutes(app: FastifyInstance): Promise<void> {
  app.get('/', healthCheck);
}
";

const FASTIFY_ROUTES_JS: &str = "import { healthCheck } from '../controllers/health-controller.js';

export async function healthRoutes(app) {
  app.get('/', healthCheck);
}
";

const FASTIFY_CONTROLLER_TS: &str = "import type { FastifyReply, FastifyRequest } from 'fastify';
import { getHealthStatus } from '../services/health-service.js';

export async function healthCheck(_request: FastifyRequest, reply: FastifyReply) {
  return reply.send(getHealthStatus());
}
";

const FASTIFY_CONTROLLER_JS: &str = "import { getHealthStatus } from '../services/health-service.js';

export async function healthCheck(_request, reply) {
  return reply.send(getHealthStatus());
}
";

const FASTIFY_MIDDLEWARE_TS: &str = "import type { FastifyInstance } from 'fastify';
import { logger } from '../utils/logger.js';

export function registerRequestLogger(app: FastifyInstance): void {
  app.addHook('onResponse', async (request, reply) => {
    logger.info('request', {
      method: request.method,
      path: request.url,
      status: reply.statusCode,
      ms: Math.round(reply.elapsedTime),
    });
  });
}
";

const FASTIFY_MIDDLEWARE_JS: &str = "import { logger } from '../utils/logger.js';

export function registerRequestLogger(app) {
  app.addHook('onResponse', async (request, reply) => {
    logger.info('request', {
      method: request.method,
      path: request.url,
      status: reply.statusCode,
      ms: Math.round(reply.elapsedTime),
    });
  });
}
";

// ── Hono ─────────────────────────────────────────────────────────────────────

const HONO_INDEX: &str = "import { serve } from '@hono/node-server';
import { Hono } from 'hono';
import { config } from './config/index.js';
import { requestLogger } from './middleware/request-logger.js';
import health from './routes/health.js';
import { logger } from './utils/logger.js';

const app = new Hono();

app.use('*', requestLogger);
app.route('/health', health);

serve({ fetch: app.fetch, port: config.port }, () => {
  logger.info('{{APP_NAME}} listening', { port: config.port });
});

export default app;
";

const HONO_ROUTES: &str = "import { Hono } from 'hono';
import { healthCheck } from '../controllers/health-controller.js';

const health = new Hono();

health.get('/', healthCheck);

export default health;
";

const HONO_CONTROLLER_TS: &str = "import type { Context } from 'hono';
import { getHealthStatus } from '../services/health-service.js';

export function healthCheck(c: Context) {
  return c.json(getHealthStatus());
}
";

const HONO_CONTROLLER_JS: &str = "import { getHealthStatus } from '../services/health-service.js';

export function healthCheck(c) {
  return c.json(getHealthStatus());
}
";

const HONO_MIDDLEWARE_TS: &str = "import type { MiddlewareHandler } from 'hono';
import { logger } from '../utils/logger.js';

export const requestLogger: MiddlewareHandler = async (c, next) => {
  const started = Date.now();
  await next();
  logger.info('request', {
    method: c.req.method,
    path: c.req.path,
    status: c.res.status,
    ms: Date.now() - started,
  });
};
";

const HONO_MIDDLEWARE_JS: &str = "import { logger } from '../utils/logger.js';

export const requestLogger = async (c, next) => {
  const started = Date.now();
  await next();
  logger.info('request', {
    method: c.req.method,
    path: c.req.path,
    status: c.res.status,
    ms: Date.now() - started,
  });
};
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::app_request::{AppName, AppRequest},
        value_objects::Port,
    };

    fn ctx(framework: NodeFramework, language: LanguageMode, port: Port) -> RenderContext {
        RenderContext::new(&AppRequest::new(
            AppName::parse("orders-api").unwrap(),
            Archetype::BackendNode {
                framework,
                language,
                port,
            },
        ))
    }

    fn render(framework: NodeFramework, language: LanguageMode) -> crate::domain::GeneratedTree {
        descriptor(language)
            .render(&ctx(framework, language, Port::Auto), "/ws/apps/orders-api")
            .unwrap()
    }

    #[test]
    fn typed_tree_has_ts_sources_and_tsconfig() {
        let tree = render(NodeFramework::Express, LanguageMode::Typed);
        assert!(tree.file("tsconfig.json").is_some());
        for path in [
            "src/index.ts",
            "src/config/index.ts",
            "src/routes/health.ts",
            "src/controllers/health-controller.ts",
            "src/services/health-service.ts",
            "src/middleware/request-logger.ts",
            "src/utils/logger.ts",
            "tests/health.test.ts",
        ] {
            assert!(tree.file(path).is_some(), "missing {path}");
        }
        assert_eq!(tree.directories().count(), DIRECTORIES.len());
    }

    #[test]
    fn untyped_tree_has_js_sources_and_no_tsconfig() {
        let tree = render(NodeFramework::Express, LanguageMode::Untyped);
        assert!(tree.file("tsconfig.json").is_none());
        assert!(tree.file("src/index.js").is_some());
        assert!(tree.file("src/index.ts").is_none());

        let controller = &tree.file("src/controllers/health-controller.js").unwrap().content;
        assert!(!controller.contains("import type"));
    }

    #[test]
    fn package_json_follows_framework_and_language() {
        let tree = render(NodeFramework::Hono, LanguageMode::Typed);
        let pkg: Value = serde_json::from_str(&tree.file("package.json").unwrap().content).unwrap();
        assert_eq!(pkg["name"], "orders-api");
        assert!(pkg["dependencies"]["hono"].is_string());
        assert!(pkg["dependencies"].get("express").is_none());
        assert_eq!(pkg["scripts"]["typecheck"], "tsc --noEmit");
        assert!(pkg["devDependencies"]["typescript"].is_string());

        let tree = render(NodeFramework::Fastify, LanguageMode::Untyped);
        let pkg: Value = serde_json::from_str(&tree.file("package.json").unwrap().content).unwrap();
        assert!(pkg["dependencies"]["fastify"].is_string());
        assert!(pkg["scripts"].get("typecheck").is_none());
        assert!(pkg.get("devDependencies").is_none());
    }

    #[test]
    fn entry_point_matches_framework() {
        let express = render(NodeFramework::Express, LanguageMode::Typed);
        assert!(express.file("src/index.ts").unwrap().content.contains("from 'express'"));

        let fastify = render(NodeFramework::Fastify, LanguageMode::Typed);
        assert!(fastify.file("src/index.ts").unwrap().content.contains("from 'fastify'"));

        let hono = render(NodeFramework::Hono, LanguageMode::Untyped);
        assert!(hono.file("src/index.js").unwrap().content.contains("@hono/node-server"));
    }

    #[test]
    fn port_is_rendered_into_config() {
        let tree = descriptor(LanguageMode::Typed)
            .render(
                &ctx(NodeFramework::Express, LanguageMode::Typed, Port::Fixed(4500)),
                "/r",
            )
            .unwrap();
        let config = &tree.file("src/config/index.ts").unwrap().content;
        assert!(config.contains("process.env.PORT ?? 4500"));
        assert!(tree.file("README.md").unwrap().content.contains("localhost:4500"));
    }

    #[test]
    fn no_placeholders_survive_rendering() {
        for fw in NodeFramework::ALL {
            for lang in [LanguageMode::Typed, LanguageMode::Untyped] {
                let tree = render(fw, lang);
                for file in tree.files() {
                    assert!(!file.content.contains("{{"), "{fw}/{lang}: {}", file.path);
                }
            }
        }
    }
}
