//! End-to-end generation for one table.

use serde::Serialize;
use tracing::info;

use crate::codegen::{Assembler, Assembly, GoFile};
use crate::config::GenerateConfig;
use crate::core::schema::TableColumns;
use crate::core::traits::SchemaSource;
use crate::error::Result;

/// Everything produced for one table.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub schema: String,
    pub table: String,
    pub struct_name: String,
    pub assembly: Assembly,
    /// Complete Go source file.
    pub source: String,
}

/// Fetches a table's columns and renders its Go declarations.
#[derive(Debug, Clone)]
pub struct Generator {
    settings: GenerateConfig,
    assembler: Assembler,
}

impl Generator {
    pub fn new(settings: GenerateConfig) -> Self {
        let assembler = Assembler::new(settings.style);
        Self {
            settings,
            assembler,
        }
    }

    pub fn settings(&self) -> &GenerateConfig {
        &self.settings
    }

    /// Read `schema.table` from `source` and render it.
    pub async fn run<S: SchemaSource + ?Sized>(
        &self,
        source: &S,
        schema: &str,
        table: &str,
    ) -> Result<Generated> {
        info!(
            "Reading columns of {}.{} from {}",
            schema,
            table,
            source.source_type()
        );
        let columns = source.fetch_columns(schema, table).await?;
        self.render(&columns)
    }

    /// Render already-fetched columns.
    pub fn render(&self, columns: &TableColumns) -> Result<Generated> {
        let assembly = self.assembler.assemble(columns, 0)?;
        let struct_name = self.settings.struct_name_for(&columns.table);
        let file = GoFile::new(&self.settings.package, &struct_name, &columns.table);
        let source = file.render(&assembly, self.settings.style.gorm);

        info!(
            "Generated {} with {} fields for {}",
            struct_name,
            columns.len(),
            columns.full_name()
        );

        Ok(Generated {
            schema: columns.schema.clone(),
            table: columns.table.clone(),
            struct_name,
            assembly,
            source,
        })
    }
}
