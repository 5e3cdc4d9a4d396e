// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use proptest::prelude::*;
use proptest::test_runner::Config;
use redgraph_model::{cache_paths, RedditConfig};

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn layout_stays_under_root_and_url_has_one_separator(
        segments in prop::collection::vec("[a-z0-9_]{1,8}", 1..4),
        host in "[a-z]{1,10}",
        slashes in 0_usize..4,
        self_loop in any::<bool>(),
    ) {
        let root: PathBuf = segments.iter().collect();
        let base = format!("http://{host}.test{}", "/".repeat(slashes));
        let config = RedditConfig::new(self_loop);
        let paths = cache_paths(&root, &base, &config);

        prop_assert!(paths.archive.starts_with(&root));
        prop_assert!(paths.graph_file.starts_with(&paths.extract_dir));
        prop_assert!(paths.data_file.starts_with(&paths.extract_dir));
        prop_assert_eq!(paths.extract_dir.parent(), Some(root.as_path()));
        prop_assert_eq!(
            paths.remote_url.clone(),
            format!("http://{host}.test/dataset/{}", config.archive_file_name())
        );
        prop_assert_eq!(paths.clone(), cache_paths(&root, &base, &config));
    }
}
