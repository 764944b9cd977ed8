/// Join the deployment base path with a bundle-relative output name.
///
/// The result always uses forward slashes and exactly one separator between
/// the base and the file name, regardless of how either side was spelled.
pub fn make_public_asset_url(base: &str, file_name: &str) -> String {
    let normalised = file_name.replace('\\', "/");
    let trimmed = normalised.trim_start_matches('/');
    let base_trimmed = base.trim_end_matches('/');

    if base_trimmed.is_empty() {
        format!("/{trimmed}")
    } else {
        format!("{base_trimmed}/{trimmed}")
    }
}
