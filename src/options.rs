use serde::Serialize;

/// One selectable choice in a configuration prompt
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

/// Operating system options
pub const OS_OPTIONS: &[SelectOption] = &[
    SelectOption { label: "Ubuntu 20.04", value: "ubuntu-20.04" },
    SelectOption { label: "Ubuntu 22.04", value: "ubuntu-22.04" },
    SelectOption { label: "Ubuntu 24.04", value: "ubuntu-24.04" },
    SelectOption { label: "RHEL 8", value: "rhel-8" },
    SelectOption { label: "RHEL 9", value: "rhel-9" },
    SelectOption { label: "CentOS 7", value: "centos-7" },
    SelectOption { label: "CentOS 8", value: "centos-8" },
    SelectOption { label: "Debian 11", value: "debian-11" },
    SelectOption { label: "Debian 12", value: "debian-12" },
];

/// Deployment target options
pub const DEPLOYMENT_OPTIONS: &[SelectOption] = &[
    SelectOption { label: "Bare Metal", value: "bare-metal" },
    SelectOption { label: "Virtual Machine", value: "vm" },
    SelectOption { label: "Docker Container", value: "docker" },
    SelectOption { label: "Kubernetes Pod", value: "k8s" },
];

/// Kernel type options
pub const KERNEL_TYPE_OPTIONS: &[SelectOption] = &[
    SelectOption { label: "Default Kernel", value: "default" },
    SelectOption { label: "Real-time Kernel", value: "realtime" },
    SelectOption { label: "Low-latency Kernel", value: "lowlatency" },
    SelectOption { label: "Custom Kernel", value: "custom" },
];

/// Kernel version options
pub const KERNEL_VERSION_OPTIONS: &[SelectOption] = &[
    SelectOption { label: "5.15.0", value: "5.15.0" },
    SelectOption { label: "5.19.0", value: "5.19.0" },
    SelectOption { label: "6.1.0", value: "6.1.0" },
    SelectOption { label: "6.2.0", value: "6.2.0" },
    SelectOption { label: "6.5.0", value: "6.5.0" },
];

/// Labels of a table, in table order, for selection prompts
pub fn labels(options: &[SelectOption]) -> Vec<&'static str> {
    options.iter().map(|o| o.label).collect()
}

/// Value behind a chosen label, falling back to the first entry
pub fn value_for_label(options: &[SelectOption], label: &str) -> &'static str {
    options
        .iter()
        .find(|o| o.label == label)
        .or_else(|| options.first())
        .map(|o| o.value)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_TABLES: &[&[SelectOption]] = &[
        OS_OPTIONS,
        DEPLOYMENT_OPTIONS,
        KERNEL_TYPE_OPTIONS,
        KERNEL_VERSION_OPTIONS,
    ];

    #[test]
    fn every_entry_has_nonempty_label_and_value() {
        for table in ALL_TABLES {
            for option in *table {
                assert!(!option.label.is_empty());
                assert!(!option.value.is_empty());
            }
        }
    }

    #[test]
    fn values_are_unique_within_each_table() {
        for table in ALL_TABLES {
            let values: HashSet<&str> = table.iter().map(|o| o.value).collect();
            assert_eq!(values.len(), table.len());
        }
    }

    #[test]
    fn tables_keep_original_sizes() {
        assert_eq!(OS_OPTIONS.len(), 9);
        assert_eq!(DEPLOYMENT_OPTIONS.len(), 4);
        assert_eq!(KERNEL_TYPE_OPTIONS.len(), 4);
        assert_eq!(KERNEL_VERSION_OPTIONS.len(), 5);
    }

    #[test]
    fn label_lookup_resolves_to_value() {
        assert_eq!(value_for_label(OS_OPTIONS, "RHEL 9"), "rhel-9");
        assert_eq!(value_for_label(DEPLOYMENT_OPTIONS, "Kubernetes Pod"), "k8s");
        // Unknown labels fall back to the first entry
        assert_eq!(value_for_label(KERNEL_TYPE_OPTIONS, "nope"), "default");
    }
}
