//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result};
use crate::loader::{load_definition, ApiDefinition};
use crate::model::Model;
use crate::query::{Manager, Queryset};
use futures::TryStreamExt;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Validate => self.validate(),
            Commands::Models => self.models(),
            Commands::Count => self.count().await,
            Commands::Get { index } => self.get(*index).await,
            Commands::Slice { start, stop } => self.slice(*start, *stop).await,
            Commands::List {
                filters,
                order_by,
                limit,
            } => self.list(filters, order_by.as_deref(), *limit).await,
            Commands::Detail { slug } => self.detail(slug).await,
            Commands::Preview => self.preview().await,
        }
    }

    /// Load API definition
    fn load_definition(&self) -> Result<ApiDefinition> {
        let path = self
            .cli
            .definition
            .as_ref()
            .ok_or_else(|| Error::config("Definition file not specified (use -d flag)"))?;
        load_definition(path)
    }

    /// Manager for the selected model
    fn manager(&self) -> Result<Manager<Model>> {
        let model = self
            .cli
            .model
            .as_deref()
            .ok_or_else(|| Error::config("Model not specified (use -m flag)"))?;
        self.load_definition()?.manager(model)
    }

    /// Validate API definition
    fn validate(&self) -> Result<()> {
        let def = self.load_definition()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Definition '{}' is valid with {} models",
                    def.name,
                    def.models.len()
                )
            }
        }));

        Ok(())
    }

    /// List model names
    fn models(&self) -> Result<()> {
        let def = self.load_definition()?;

        let models: Vec<Value> = def
            .models
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "url": m.base_url(),
                    "slug_field": m.slug_field,
                    "page_size": m.pagination.page_size()
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "MODELS",
            "api": def.name,
            "models": models
        }));

        Ok(())
    }

    async fn count(&self) -> Result<()> {
        let mut qs = self.manager()?.all();
        let count = qs.len().await?;

        self.output_message(&json!({
            "type": "COUNT",
            "model": qs.name(),
            "count": count
        }));

        Ok(())
    }

    async fn get(&self, index: usize) -> Result<()> {
        let mut qs = self.manager()?.all();
        let instance = qs.get(index).await?;
        self.output_record(&instance);
        Ok(())
    }

    async fn slice(&self, start: usize, stop: usize) -> Result<()> {
        let mut qs = self.manager()?.all();
        for instance in qs.get_slice(start, stop).await? {
            self.output_record(&instance);
        }
        Ok(())
    }

    async fn list(
        &self,
        filters: &[(String, String)],
        order_by: Option<&str>,
        limit: Option<usize>,
    ) -> Result<()> {
        let started = Instant::now();
        let manager = self.manager()?;
        let mut qs = manager.filter(filters.iter().cloned());
        if let Some(field) = order_by {
            qs = qs.order_by(field);
        }

        let emitted = match limit {
            Some(limit) => {
                let instances = qs.get_slice(0, limit).await?;
                for instance in &instances {
                    self.output_record(instance);
                }
                instances.len()
            }
            None => self.drain(&mut qs).await?,
        };

        info!(
            model = qs.name(),
            records = emitted,
            pages = qs.cache().fetch_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "List complete"
        );
        Ok(())
    }

    /// Print every instance of `qs` as pages arrive
    async fn drain(&self, qs: &mut Queryset<Model>) -> Result<usize> {
        let stream = qs.iter();
        futures::pin_mut!(stream);

        let mut emitted = 0;
        while let Some(instance) = stream.try_next().await? {
            self.output_record(&instance);
            emitted += 1;
        }
        Ok(emitted)
    }

    async fn detail(&self, slug: &str) -> Result<()> {
        let instance = self.manager()?.get(slug).await?;
        self.output_record(&instance);
        Ok(())
    }

    async fn preview(&self) -> Result<()> {
        let mut qs = self.manager()?.all();
        let preview = qs.preview().await?;

        self.output_message(&json!({
            "type": "PREVIEW",
            "model": qs.name(),
            "preview": preview
        }));

        Ok(())
    }

    /// Output one instance
    fn output_record(&self, instance: &Model) {
        self.output_message(&json!({
            "type": "RECORD",
            "model": instance.meta().name,
            "record": instance.to_json()
        }));
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
