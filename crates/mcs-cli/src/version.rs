// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build information and version utilities.

use mcs_common_version::BuildInfo;

/// Format version info for display.
pub fn format_version_info() -> String {
	let info = BuildInfo::current();

	format!(
		"Version:  {}\n\
         Git SHA:  {}\n\
         Built:    {}\n\
         Platform: {}",
		info.version, info.git_sha, info.build_timestamp, info.platform,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_version_info_lists_fields() {
		let text = format_version_info();
		assert!(text.contains("Version:"));
		assert!(text.contains("Git SHA:"));
		assert!(text.contains(mcs_common_version::PLATFORM));
	}
}
