//! Code generation engine
//!
//! [`CodeGenerator`] owns every exporter with its compiled templates and runs
//! parse, schema building and export for a set of options.

use crate::config::GenOptions;
use crate::error::{CodegenError, CodegenResult};
use crate::export::{
    HandlerExporter, JsonExporter, ModelExporter, ProtoExporter, UpdateFieldsExporter,
};
use crate::import::SqlParser;
use crate::mapping::collect_imports;
use crate::models::{CodeType, TableSchema};
use crate::schema::{SchemaBuilder, model_imports};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Separator between per-table outputs of one artifact kind
pub const TABLE_SEPARATOR: &str = "\n\n";
/// Separator of the table name list
pub const TABLE_NAME_SEPARATOR: &str = ", ";

static SHARED: OnceCell<CodeGenerator> = OnceCell::new();

/// Generated artifacts keyed by kind
///
/// Every [`CodeType`] is present in a successful result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedCodes {
    codes: BTreeMap<CodeType, String>,
}

impl GeneratedCodes {
    pub fn get(&self, code_type: CodeType) -> Option<&str> {
        self.codes.get(&code_type).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Artifacts keyed by their string names (`model`, `__table_name__`, ...)
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.codes
            .into_iter()
            .map(|(k, v)| (k.as_str().to_string(), v))
            .collect()
    }

    /// Take one artifact out of the result
    pub fn take(mut self, code_type: CodeType) -> CodegenResult<String> {
        self.codes
            .remove(&code_type)
            .ok_or_else(|| CodegenError::UnknownCodeType(code_type.to_string()))
    }
}

/// The code generator
///
/// Templates are compiled once in [`CodeGenerator::new`]; a generator can be
/// shared across threads and reused for any number of calls.
pub struct CodeGenerator {
    model: ModelExporter,
    update_fields: UpdateFieldsExporter,
    handler: HandlerExporter,
    json: JsonExporter,
    proto: ProtoExporter,
}

impl CodeGenerator {
    /// Compile all templates
    ///
    /// # Errors
    ///
    /// [`CodegenError::TemplateCompile`] if a built-in template is broken.
    pub fn new() -> CodegenResult<Self> {
        Ok(Self {
            model: ModelExporter::new()?,
            update_fields: UpdateFieldsExporter::new()?,
            handler: HandlerExporter::new()?,
            json: JsonExporter::new()?,
            proto: ProtoExporter::new()?,
        })
    }

    /// Process-wide generator, compiled on first use
    pub fn shared() -> CodegenResult<&'static CodeGenerator> {
        SHARED.get_or_try_init(CodeGenerator::new)
    }

    /// Parse and resolve every `CREATE TABLE` of `options.sql`
    pub fn schemas(&self, options: &GenOptions) -> CodegenResult<Vec<TableSchema>> {
        options.validate()?;
        let parser = SqlParser::new(options.parser_config());
        let builder = SchemaBuilder::new(options);
        Ok(parser
            .parse_tables(&options.sql)?
            .iter()
            .map(|t| builder.build(t))
            .collect())
    }

    /// Generate every artifact
    ///
    /// # Errors
    ///
    /// Input errors ([`CodegenError::MissingSql`], [`CodegenError::Parse`])
    /// or internal ones from the exporters. No partial result is returned.
    pub fn generate(&self, options: &GenOptions) -> CodegenResult<GeneratedCodes> {
        let tables = self.schemas(options)?;
        info!("Generating code for {} table(s)", tables.len());

        let mut structs = Vec::with_capacity(tables.len());
        let mut imports = Vec::new();
        let mut json = Vec::with_capacity(tables.len());
        let mut dao = Vec::with_capacity(tables.len());
        let mut handler = Vec::with_capacity(tables.len());
        let mut proto = Vec::with_capacity(tables.len());
        let mut names = Vec::with_capacity(tables.len());

        for table in &tables {
            debug!("Exporting table '{}'", table.raw_table_name);
            structs.push(self.model.export_struct(table, options.embed)?);
            imports.extend(model_imports(table, options.embed));
            json.push(self.json.export(table)?);
            dao.push(self.update_fields.export(table, options.embed)?);
            handler.push(self.handler.export(table)?);
            proto.push(self.proto.export(table)?);
            names.push(table.normalized_name.clone());
        }

        let model = self.model.export_file(
            options.package_name(),
            &collect_imports(&imports),
            &structs,
        )?;

        let codes = BTreeMap::from([
            (CodeType::Model, model),
            (CodeType::Json, json.join(TABLE_SEPARATOR)),
            (CodeType::Dao, dao.join(TABLE_SEPARATOR)),
            (CodeType::Handler, handler.join(TABLE_SEPARATOR)),
            (CodeType::Proto, proto.join(TABLE_SEPARATOR)),
            (CodeType::TableName, names.join(TABLE_NAME_SEPARATOR)),
        ]);
        Ok(GeneratedCodes { codes })
    }

    /// Generate a single artifact
    pub fn generate_code(&self, options: &GenOptions, code_type: CodeType) -> CodegenResult<String> {
        self.generate(options)?.take(code_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodeGenerator>();
    }

    #[test]
    fn test_shared_is_one_instance() {
        let a = CodeGenerator::shared().unwrap() as *const CodeGenerator;
        let b = CodeGenerator::shared().unwrap() as *const CodeGenerator;
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_has_every_code_type() {
        let codes = CodeGenerator::new()
            .unwrap()
            .generate(&GenOptions::new("CREATE TABLE users (id INT, name TEXT)"))
            .unwrap();
        assert_eq!(codes.len(), CodeType::ALL.len());
        for code_type in CodeType::ALL {
            assert!(codes.get(code_type).is_some(), "{}", code_type);
        }
        assert_eq!(codes.get(CodeType::TableName), Some("User"));
    }

    #[test]
    fn test_missing_sql() {
        let result = CodeGenerator::new().unwrap().generate(&GenOptions::default());
        assert!(matches!(result, Err(CodegenError::MissingSql)));
    }
}
