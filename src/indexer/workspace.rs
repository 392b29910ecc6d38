//! Walks a workspace and loads every translation file into a [`Catalog`].
use std::path::Path;

use ignore::WalkBuilder;

use crate::config::{
    FileMatcher,
    I18nSettings,
    TranslationFileKind,
};
use crate::indexer::types::{
    IndexerError,
    TranslationFile,
};
use crate::input::catalog::{
    Catalog,
    CatalogBuilder,
};
use crate::input::translation::load_translation_file;

/// Builds catalogs from translation files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogIndexer;

impl CatalogIndexer {
    /// ワークスペースをインデックス
    ///
    /// Files are loaded in path order, so a later file wins when two files set the same leaf.
    /// Unreadable or malformed files are skipped.
    ///
    /// # Errors
    /// `workspace_path` is not a directory, or the file patterns do not compile.
    pub fn index_workspace(
        workspace_path: &Path,
        settings: &I18nSettings,
    ) -> Result<Catalog, IndexerError> {
        tracing::debug!(workspace_path = %workspace_path.display(), "Indexing workspace");
        if !workspace_path.is_dir() {
            return Err(IndexerError::InvalidPath(workspace_path.to_path_buf()));
        }

        let files = Self::find_translation_files(workspace_path, settings)?;
        let mut builder = CatalogBuilder::from_settings(settings);
        for file in &files {
            Self::index_file(&mut builder, file);
        }

        tracing::debug!(files = files.len(), "Workspace indexed");
        Ok(builder.build())
    }

    /// 単一ファイルを読み込んでビルダーに追加
    fn index_file(builder: &mut CatalogBuilder, file: &TranslationFile) {
        let locales = match load_translation_file(&file.path) {
            Ok(locales) => locales,
            Err(e) => {
                // 読み込みエラーは警告として扱い、処理を続行
                tracing::warn!("Skipping translation file {:?}: {}", file.path, e);
                return;
            }
        };

        for (locale, root) in locales {
            match file.kind {
                TranslationFileKind::Primary => builder.add_locale(locale, root),
                TranslationFileKind::Extras => builder.add_extras(locale, root),
            };
        }
    }

    /// 翻訳ファイルを検索
    ///
    /// # Errors
    /// The file patterns do not compile.
    pub fn find_translation_files(
        workspace_path: &Path,
        settings: &I18nSettings,
    ) -> Result<Vec<TranslationFile>, IndexerError> {
        let matcher = FileMatcher::new(workspace_path.to_path_buf(), settings)?;
        let mut found_files = Vec::new();

        // ignore クレートでファイルを走査
        for result in WalkBuilder::new(workspace_path)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            // ファイルのみを対象
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Some(kind) = matcher.classify(path) else {
                continue;
            };

            found_files.push(TranslationFile { path: path.to_path_buf(), kind });
        }

        found_files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(found_files)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    /// Writes `content` to `relative` under `root`, creating parent directories.
    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[fixture]
    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "config/locales/client.en.json", r#"{"en": {"js": {"hello": "Hello"}}}"#);
        write(root, "config/locales/client.ru.json", r#"{"ru": {"js": {"hello": "Привет"}}}"#);
        write(root, "config/locales/extras/admin.en.json", r#"{"en": {"admin": {"title": "Admin"}}}"#);
        write(root, "config/locales/broken.json", "{ not json");
        write(root, "node_modules/pkg/locales/en.json", r#"{"en": {"js": {"hello": "Vendored"}}}"#);
        write(root, "src/app.json", r#"{"en": {"js": {"hello": "Unrelated"}}}"#);
        temp_dir
    }

    #[rstest]
    fn finds_and_classifies_translation_files(workspace: TempDir) {
        let root = workspace.path();
        let files =
            CatalogIndexer::find_translation_files(root, &I18nSettings::default()).unwrap();

        assert_that!(
            files.iter().map(|file| file.path.clone()).collect::<Vec<_>>(),
            elements_are![
                eq(&root.join("config/locales/broken.json")),
                eq(&root.join("config/locales/client.en.json")),
                eq(&root.join("config/locales/client.ru.json")),
                eq(&root.join("config/locales/extras/admin.en.json")),
            ]
        );
        assert_that!(
            files.iter().map(|file| file.kind).collect::<Vec<_>>(),
            elements_are![
                eq(&TranslationFileKind::Primary),
                eq(&TranslationFileKind::Primary),
                eq(&TranslationFileKind::Primary),
                eq(&TranslationFileKind::Extras),
            ]
        );
    }

    #[rstest]
    fn builds_catalog_skipping_broken_files(workspace: TempDir) {
        let catalog =
            CatalogIndexer::index_workspace(workspace.path(), &I18nSettings::default()).unwrap();
        let table = catalog.translations();

        assert_that!(table.locales(), elements_are![eq(&"en"), eq(&"ru")]);
        assert_that!(
            table.locale("ru").and_then(|root| root.walk(["js", "hello"])).and_then(|hit| hit.as_text()),
            some(eq("Привет"))
        );
        assert_that!(
            table.extras("en").and_then(|root| root.walk(["admin", "title"])).and_then(|hit| hit.as_text()),
            some(eq("Admin"))
        );
    }

    #[rstest]
    fn rejects_missing_workspace() {
        let result = CatalogIndexer::index_workspace(
            Path::new("/nonexistent/workspace"),
            &I18nSettings::default(),
        );

        assert_that!(result, err(matches_pattern!(IndexerError::InvalidPath(anything()))));
    }
}
