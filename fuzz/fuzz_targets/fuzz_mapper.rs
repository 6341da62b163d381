#![no_main]

use std::path::{Path, PathBuf};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let mapper = bryc::PathMapper::new(
            PathBuf::from("/project/src"),
            PathBuf::from("/project/out"),
            vec!["py".to_string(), "bry".to_string()],
            ".js".to_string(),
        );
        // Path mapping should never panic, whatever the input looks like
        let _ = mapper.is_source_file(Path::new(raw));
        let _ = mapper.artifact_path(Path::new(raw));
        let _ = mapper.module_name(Path::new(raw));
    }
});
