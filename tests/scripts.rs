use std::fs;

use m87::run_source;
use walkdir::WalkDir;

#[test]
fn example_scripts_match_their_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "m87"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read \
                                                                      {expected_path:?}: {e}")
                                                          });

        count += 1;
        match run_source(&source) {
            Ok(output) => {
                let expected = expected.lines().collect::<Vec<_>>();
                assert_eq!(output, expected, "output of {path:?} differs");
            },
            Err(e) => panic!("Script {path:?} failed:\n{e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}
