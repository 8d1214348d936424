use crate::PersistenceConfig;
use indexmap::IndexMap;
use loam_codegen::{Generator, AUTO_GENERATOR_PROVIDER};
use loam_core::{err, Error, Migrator, Result, Schema};
use loam_psl::{self as psl, Datasource, Expr, ParsedFile, Parser};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Loads schemas from schema text files and writes edits back.
///
/// Remembers which file each model was loaded from, and the datasource and
/// generator blocks of each file, so that writing a model back preserves the
/// rest of its file.
#[derive(Debug)]
pub struct SchemaPersistence {
    config: PersistenceConfig,
    parser: Box<dyn Parser>,
    migrator: Box<dyn Migrator>,

    /// Model name to the file holding it.
    schema_files: IndexMap<String, PathBuf>,

    datasources: HashMap<PathBuf, Datasource>,
    generators: HashMap<PathBuf, psl::Generator>,
}

impl SchemaPersistence {
    pub fn new(
        config: PersistenceConfig,
        parser: Box<dyn Parser>,
        migrator: Box<dyn Migrator>,
    ) -> SchemaPersistence {
        SchemaPersistence {
            config,
            parser,
            migrator,
            schema_files: IndexMap::new(),
            datasources: HashMap::new(),
            generators: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Returns the file each known model was loaded from or saved to.
    pub fn schema_files(&self) -> &IndexMap<String, PathBuf> {
        &self.schema_files
    }

    /// Loads every schema under the configured path.
    ///
    /// A missing path is not an error: a path that looks like a directory is
    /// created, and either way no schemas are returned. In directory mode a
    /// file that fails to parse is skipped with a warning.
    pub fn load_schemas(&mut self) -> Result<Vec<Schema>> {
        let path = self.config.schema_path.clone();

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if looks_like_directory(&path) {
                    info!(
                        parent: &self.config.span,
                        path = %path.display(),
                        "creating schema directory"
                    );
                    fs::create_dir_all(&path).map_err(|e| {
                        Error::from(e).context(err!(
                            "failed to create schema directory {}",
                            path.display()
                        ))
                    })?;
                }
                return Ok(vec![]);
            }
            Err(e) => return Err(e.into()),
        };

        let schemas = if metadata.is_dir() {
            self.load_directory(&path)?
        } else {
            let parsed = self
                .parse_file(&path)
                .map_err(|e| e.context(err!("failed to load schema file {}", path.display())))?;
            self.record(&path, parsed)
        };

        info!(
            parent: &self.config.span,
            path = %path.display(),
            models = schemas.len(),
            "loaded models from schema files"
        );

        Ok(schemas)
    }

    /// Writes `schema` to its file, replacing any previous version of the
    /// model in that file.
    pub fn save_schema(&mut self, schema: &Schema) -> Result<()> {
        let path = self.schema_file_path(&schema.name);
        let new_file = !path.exists();
        let mut schemas = self.load_existing(&path)?;

        match schemas.iter_mut().find(|existing| existing.name == schema.name) {
            Some(existing) => *existing = schema.clone(),
            None => schemas.push(schema.clone()),
        }

        self.write_file(&path, &schemas, new_file)?;
        self.schema_files.insert(schema.name.clone(), path);
        Ok(())
    }

    /// Removes the model `name` from its file.
    ///
    /// A file left without models is deleted, unless it is the configured
    /// schema file itself.
    pub fn remove_schema(&mut self, name: &str) -> Result<()> {
        let path = self.schema_file_path(name);
        let mut schemas = self.load_existing(&path)?;

        let before = schemas.len();
        schemas.retain(|schema| schema.name != name);
        if schemas.len() == before {
            return Err(Error::not_found("model", name)
                .context(err!("failed to remove schema from {}", path.display())));
        }

        if schemas.is_empty() && path != self.config.schema_path {
            fs::remove_file(&path).map_err(|e| {
                Error::from(e).context(err!("failed to delete schema file {}", path.display()))
            })?;
            self.datasources.remove(&path);
            self.generators.remove(&path);

            debug!(parent: &self.config.span, path = %path.display(), "deleted empty schema file");
        } else {
            self.write_file(&path, &schemas, false)?;
        }

        self.schema_files.shift_remove(name);
        Ok(())
    }

    fn load_directory(&mut self, dir: &Path) -> Result<Vec<Schema>> {
        let mut paths = vec![];

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_dir() || !self.has_schema_extension(&path) {
                continue;
            }

            paths.push(path);
        }

        paths.sort();

        let mut schemas = vec![];

        for path in paths {
            let parsed = match self.parse_file(&path) {
                Ok(parsed) => parsed,
                Err(e) if e.is_parse() => {
                    warn!(
                        parent: &self.config.span,
                        path = %path.display(),
                        error = %e,
                        "failed to load schema file"
                    );
                    continue;
                }
                Err(e) => {
                    return Err(e.context(err!("failed to load schema file {}", path.display())))
                }
            };

            schemas.extend(self.record(&path, parsed));
        }

        Ok(schemas)
    }

    fn parse_file(&self, path: &Path) -> Result<ParsedFile> {
        let source = fs::read_to_string(path)?;
        Ok(self.parser.parse(&source)?)
    }

    /// Remembers where the models and blocks of a parsed file came from.
    fn record(&mut self, path: &Path, parsed: ParsedFile) -> Vec<Schema> {
        for schema in &parsed.schemas {
            self.schema_files
                .insert(schema.name.clone(), path.to_path_buf());
        }

        self.record_blocks(path, parsed.datasource, parsed.generator);
        parsed.schemas
    }

    fn record_blocks(
        &mut self,
        path: &Path,
        datasource: Option<Datasource>,
        generator: Option<psl::Generator>,
    ) {
        if let Some(datasource) = datasource {
            self.datasources.insert(path.to_path_buf(), datasource);
        }

        if let Some(generator) = generator {
            self.generators.insert(path.to_path_buf(), generator);
        }
    }

    /// Returns the current models of the file at `path`, or none if the file
    /// does not exist yet.
    fn load_existing(&mut self, path: &Path) -> Result<Vec<Schema>> {
        if !path.exists() {
            return Ok(vec![]);
        }

        let parsed = self
            .parse_file(path)
            .map_err(|e| e.context(err!("failed to load schema file {}", path.display())))?;

        self.record_blocks(path, parsed.datasource, parsed.generator);
        Ok(parsed.schemas)
    }

    fn schema_file_path(&self, model: &str) -> PathBuf {
        if let Some(path) = self.schema_files.get(model) {
            return path.clone();
        }

        if self.config.schema_path.is_dir() {
            let file_name = format!("{}.{}", model.to_lowercase(), self.config.extension);
            return self.config.schema_path.join(file_name);
        }

        self.config.schema_path.clone()
    }

    /// Renders `schemas` into the file at `path`. Only a `new_file` without
    /// datasource or generator blocks receives the auto-generator marker.
    fn write_file(&mut self, path: &Path, schemas: &[Schema], new_file: bool) -> Result<()> {
        let datasource = self.datasources.get(path).cloned();
        let mut generator = self.generators.get(path).cloned();
        let mut marker = None;

        if new_file && datasource.is_none() && generator.is_none() && !schemas.is_empty() {
            let auto = psl::Generator::new("client")
                .property("provider", Expr::string(AUTO_GENERATOR_PROVIDER));
            generator = Some(auto.clone());
            marker = Some(auto);
        }

        let content = Generator::new(&*self.migrator).generate_full_file(
            schemas,
            datasource.as_ref(),
            generator.as_ref(),
        );

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        fs::write(path, content).map_err(|e| {
            Error::from(e).context(err!("failed to write schema file {}", path.display()))
        })?;

        if let Some(marker) = marker {
            self.generators.insert(path.to_path_buf(), marker);
        }

        debug!(
            parent: &self.config.span,
            path = %path.display(),
            models = schemas.len(),
            "wrote schema file"
        );

        Ok(())
    }

    fn has_schema_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.config.extension.as_str())
    }
}

/// A missing path is treated as a directory when it ends with a separator or
/// its last component has no extension.
fn looks_like_directory(path: &Path) -> bool {
    let ends_with_separator = path
        .as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator);

    ends_with_separator
        || path
            .file_name()
            .map_or(true, |name| !name.to_string_lossy().contains('.'))
}
