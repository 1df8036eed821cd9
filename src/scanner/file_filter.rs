use crate::config::Config;

/// Decides, by file name alone, whether a discovered file is the dump itself
/// or carries one of the binary extensions.
pub struct FileFilter {
    output_file_name: String,
    skip_extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &Config) -> Self {
        Self {
            output_file_name: config.output.file_name.clone(),
            skip_extensions: config
                .filters
                .skip_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    pub fn is_output_file(&self, file_name: &str) -> bool {
        file_name == self.output_file_name
    }

    /// Suffix match against the lowercased name, so `archive.TAR.GZ` hits `.gz`.
    pub fn is_binary_file(&self, file_name: &str) -> bool {
        self.matching_extension(file_name).is_some()
    }

    pub fn matching_extension(&self, file_name: &str) -> Option<&str> {
        let name_lower = file_name.to_lowercase();
        self.skip_extensions
            .iter()
            .find(|ext| name_lower.ends_with(ext.as_str()))
            .map(String::as_str)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_extension_detection() {
        let filter = FileFilter::default();

        assert!(filter.is_binary_file("logo.png"));
        assert!(filter.is_binary_file("photo.JPEG"));
        assert!(filter.is_binary_file("release.tar.gz"));
        assert!(filter.is_binary_file("module.cpython-311.pyc"));
        assert!(filter.is_binary_file("font.woff2"));

        assert!(!filter.is_binary_file("main.rs"));
        assert!(!filter.is_binary_file("README.md"));
        assert!(!filter.is_binary_file("Makefile"));
        assert!(!filter.is_binary_file("png"));
    }

    #[test]
    fn test_case_insensitive_extensions() {
        let filter = FileFilter::default();

        assert!(filter.is_binary_file("image.png"));
        assert!(filter.is_binary_file("image.PNG"));
        assert!(filter.is_binary_file("image.Png"));
        assert_eq!(filter.matching_extension("IMAGE.PNG"), Some(".png"));
    }

    #[test]
    fn test_output_file_detection() {
        let filter = FileFilter::default();

        assert!(filter.is_output_file("project_code_dump.txt"));
        assert!(!filter.is_output_file("Project_Code_Dump.txt"));
        assert!(!filter.is_output_file("notes.txt"));
    }

    #[test]
    fn test_custom_configuration() {
        let mut config = Config::default();
        config.output.file_name = "everything.md".to_string();
        config.filters.skip_extensions = vec![".LOCK".to_string()];

        let filter = FileFilter::new(&config);

        assert!(filter.is_output_file("everything.md"));
        assert!(!filter.is_output_file("project_code_dump.txt"));
        assert!(filter.is_binary_file("Cargo.lock"));
        assert!(!filter.is_binary_file("logo.png"));
    }
}
