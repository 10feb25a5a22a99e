//! Built-in platform and family declarations.
//!
//! These describe the standard classification trees only. How a live
//! target is matched against them is up to each transport's detection
//! logic.

use crate::core::registry::{Registry, RegistryError};

/// (name, title, family) for every built-in platform.
type PlatformSpec = (&'static str, &'static str, &'static str);

/// (family, parent) in declaration order. Parents come first so the
/// listing order follows the tree.
const OS_FAMILIES: &[(&str, &str)] = &[
    ("windows", "os"),
    ("unix", "os"),
    ("linux", "unix"),
    ("debian", "linux"),
    ("fedora", "linux"),
    ("redhat", "linux"),
    ("suse", "linux"),
    ("arch", "linux"),
    ("bsd", "unix"),
    ("darwin", "bsd"),
    ("solaris", "unix"),
    ("aix", "unix"),
    ("hpux", "unix"),
    ("qnx", "unix"),
    ("esx", "os"),
    ("cisco", "os"),
    ("brocade", "os"),
];

const OS_PLATFORMS: &[PlatformSpec] = &[
    ("windows", "Windows", "windows"),
    ("debian", "Debian Linux", "debian"),
    ("ubuntu", "Ubuntu Linux", "debian"),
    ("linuxmint", "LinuxMint", "debian"),
    ("raspbian", "Raspbian Linux", "debian"),
    ("kali", "Kali Linux", "debian"),
    ("fedora", "Fedora", "fedora"),
    ("redhat", "Red Hat Enterprise Linux", "redhat"),
    ("centos", "Centos Linux", "redhat"),
    ("oracle", "Oracle Linux", "redhat"),
    ("scientific", "Scientific Linux", "redhat"),
    ("amazon", "Amazon Linux", "redhat"),
    ("almalinux", "AlmaLinux", "redhat"),
    ("rocky", "Rocky Linux", "redhat"),
    ("xenserver", "Citrix XenServer Linux", "redhat"),
    ("opensuse", "OpenSUSE Linux", "suse"),
    ("suse", "Suse Linux", "suse"),
    ("arch", "Arch Linux", "arch"),
    ("manjaro", "Manjaro Linux", "arch"),
    ("slackware", "Slackware Linux", "linux"),
    ("gentoo", "Gentoo Linux", "linux"),
    ("alpine", "Alpine Linux", "linux"),
    ("busybox", "BusyBox Linux", "linux"),
    ("coreos", "CoreOS Linux", "linux"),
    ("yocto", "Yocto Linux", "linux"),
    ("linux", "Generic Linux", "linux"),
    ("mac_os_x", "macOS X", "darwin"),
    ("darwin", "Darwin", "darwin"),
    ("freebsd", "Freebsd", "bsd"),
    ("openbsd", "Openbsd", "bsd"),
    ("netbsd", "Netbsd", "bsd"),
    ("dragonflybsd", "Dragonfly BSD", "bsd"),
    ("solaris", "Solaris", "solaris"),
    ("smartos", "SmartOS", "solaris"),
    ("omnios", "Omnios", "solaris"),
    ("openindiana", "Openindiana", "solaris"),
    ("aix", "Aix", "aix"),
    ("hpux", "Hpux", "hpux"),
    ("qnx", "QNX", "qnx"),
    ("vmkernel", "VMware ESXi", "esx"),
    ("cisco_ios", "Cisco IOS", "cisco"),
    ("cisco_ios_xe", "Cisco IOS XE", "cisco"),
    ("cisco_nexus", "Cisco Nexus", "cisco"),
    ("brocade_fos", "Brocade FOS", "brocade"),
];

const API_FAMILIES: &[(&str, &str)] = &[("cloud", "api"), ("iaas", "api")];

const API_PLATFORMS: &[PlatformSpec] = &[
    ("aws", "AWS API", "cloud"),
    ("azure", "Azure API", "cloud"),
    ("gcp", "GCP API", "cloud"),
    ("vmware", "VMware API", "cloud"),
    ("oci", "OCI API", "cloud"),
    ("openstack", "OpenStack API", "iaas"),
];

/// Register the operating-system tree.
pub fn load_os(registry: &mut Registry) -> Result<(), RegistryError> {
    load(registry, "Operating Systems", "os", OS_FAMILIES, OS_PLATFORMS)
}

/// Register the API tree (cloud providers and IaaS endpoints).
pub fn load_api(registry: &mut Registry) -> Result<(), RegistryError> {
    load(registry, "API", "api", API_FAMILIES, API_PLATFORMS)
}

/// Register every built-in tree.
pub fn load_all(registry: &mut Registry) -> Result<(), RegistryError> {
    load_os(registry)?;
    load_api(registry)
}

fn load(
    registry: &mut Registry,
    root_title: &str,
    root: &str,
    families: &[(&str, &str)],
    platforms: &[PlatformSpec],
) -> Result<(), RegistryError> {
    let root = registry.family(root, None);
    registry.get_family_mut(root).set_title(root_title);

    for (family, parent) in families {
        let id = registry.family(family, None);
        registry.in_family(id, parent)?;
    }

    for (name, title, family) in platforms {
        let id = registry.name(name, None);
        registry.platform_mut(id).set_title(*title);
        registry.in_family(id, family)?;
    }

    tracing::debug!(
        "loaded {} platform specifications ({} platforms, {} families)",
        root_title,
        platforms.len(),
        families.len() + 1
    );
    Ok(())
}
