//! USB gadget lifecycle through configfs.
//!
//! [`GadgetManager::enable`] builds the composite HID gadget under
//! `usb_gadget/<name>` and binds it to the first UDC:
//!
//! ```text
//! bt2usb/
//! ├── idVendor, idProduct, bcdDevice, bcdUSB, bDevice*, bMaxPacketSize0
//! ├── strings/0x409/{manufacturer,product,serialnumber}
//! ├── functions/hid.usbN/{protocol,subclass,report_length,report_desc}
//! ├── configs/c.1/{MaxPower,bmAttributes,strings/0x409/configuration}
//! ├── configs/c.1/hid.usbN -> functions/hid.usbN
//! └── UDC
//! ```
//!
//! [`GadgetManager::disable`] unbinds first, then removes everything in
//! reverse order. configfs refuses to rebuild a bound gadget, so a gadget
//! left behind by a crashed run is torn down before building a new one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io;
use std::ops::{Deref, DerefMut};
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::hid_device::HidGadgetSink;
use crate::config;
use crate::error::{Error, Result};
use crate::hid::report_protocol::check_descriptor;
use crate::hid::{NullSink, Profile, ReportSink};

/// The report sink of every profile, shared by all relays.
///
/// Profiles that are not enabled resolve to a [`NullSink`].
#[derive(Clone, Default)]
pub struct GadgetSinks {
    sinks: BTreeMap<Profile, Arc<dyn ReportSink>>,
}

impl GadgetSinks {
    /// No profile enabled: every report is discarded.
    pub fn sandbox() -> Self {
        Self::default()
    }

    pub fn with(mut self, profile: Profile, sink: Arc<dyn ReportSink>) -> Self {
        self.sinks.insert(profile, sink);
        self
    }

    pub fn get(&self, profile: Profile) -> Option<Arc<dyn ReportSink>> {
        self.sinks.get(&profile).cloned()
    }

    /// Sink for `profile`, discarding reports if the profile is not enabled.
    pub fn sink(&self, profile: Profile) -> Arc<dyn ReportSink> {
        self.get(profile).unwrap_or_else(|| Arc::new(NullSink))
    }

    pub fn profiles(&self) -> impl Iterator<Item = Profile> + '_ {
        self.sinks.keys().copied()
    }
}

impl fmt::Debug for GadgetSinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.sinks.keys()).finish()
    }
}

struct Enabled {
    profiles: BTreeSet<Profile>,
    sinks: GadgetSinks,
}

/// Owner of the configfs gadget tree.
pub struct GadgetManager {
    root: PathBuf,
    udc_dir: PathBuf,
    dev_dir: PathBuf,
    enabled: Option<Enabled>,
}

impl GadgetManager {
    /// Manager for the system locations in [`config`].
    pub fn new() -> Self {
        Self::with_paths(config::GADGET_ROOT, config::UDC_CLASS_DIR, config::DEV_DIR)
    }

    /// Manager rooted at custom locations (gadget dir, UDC class dir, device dir).
    pub fn with_paths(
        root: impl Into<PathBuf>,
        udc_dir: impl Into<PathBuf>,
        dev_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            udc_dir: udc_dir.into(),
            dev_dir: dev_dir.into(),
            enabled: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.is_some()
    }

    /// Build and bind a gadget exposing `profiles`.
    ///
    /// Calling it again with the same set returns the existing sinks.
    pub fn enable(&mut self, profiles: &[Profile]) -> Result<GadgetSinks> {
        let requested: BTreeSet<Profile> = profiles.iter().copied().collect();
        if let Some(enabled) = &self.enabled {
            if enabled.profiles == requested {
                debug!("gadget already enabled");
                return Ok(enabled.sinks.clone());
            }
            self.disable()?;
        }

        let gadget_dir = self.root.parent().unwrap_or(&self.root).to_path_buf();
        if !gadget_dir.is_dir() {
            return Err(Error::GadgetUnavailable(gadget_dir));
        }
        for &profile in &requested {
            check_descriptor(profile)?;
        }
        let udc = self.find_udc()?;

        if self.root.exists() {
            warn!(path = %self.root.display(), "removing stale gadget");
            teardown(&self.root)?;
        }

        info!(profiles = ?requested, udc = %udc, "enabling USB gadget");
        let functions = match self.build_and_bind(&requested, &udc) {
            Ok(functions) => functions,
            Err(e) => {
                if let Err(cleanup) = teardown(&self.root) {
                    error!(
                        path = %self.root.display(),
                        "failed to remove partial gadget: {cleanup}"
                    );
                }
                return Err(e);
            }
        };

        let mut sinks = GadgetSinks::default();
        for (index, (profile, function)) in functions.iter().enumerate() {
            let node = self.device_node(function, index);
            debug!(%profile, node = %node.display(), "HID function bound");
            sinks = sinks.with(*profile, Arc::new(HidGadgetSink::new(*profile, node)));
        }

        self.enabled = Some(Enabled {
            profiles: requested,
            sinks: sinks.clone(),
        });
        Ok(sinks)
    }

    /// Unbind and remove the gadget. A no-op when nothing is enabled.
    pub fn disable(&mut self) -> Result<()> {
        if self.enabled.take().is_none() {
            return Ok(());
        }
        info!(path = %self.root.display(), "disabling USB gadget");
        teardown(&self.root)
    }

    /// First USB device controller, in name order.
    fn find_udc(&self) -> Result<String> {
        let entries = match fs::read_dir(&self.udc_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NoDeviceController(self.udc_dir.clone()))
            }
            Err(e) => return Err(Error::configfs(&self.udc_dir, e)),
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoDeviceController(self.udc_dir.clone()))
    }

    fn build_and_bind(
        &self,
        profiles: &BTreeSet<Profile>,
        udc: &str,
    ) -> Result<Vec<(Profile, String)>> {
        let functions = self.build(profiles)?;
        write_attr(&self.root.join("UDC"), udc.as_bytes())?;
        Ok(functions)
    }

    /// Create identity, strings, configuration and one function per profile.
    /// Returns the function directory names in creation order.
    fn build(&self, profiles: &BTreeSet<Profile>) -> Result<Vec<(Profile, String)>> {
        let root = &self.root;
        make_dir(root)?;

        write_attr(&root.join("bcdDevice"), hex16(config::USB_BCD_DEVICE).as_bytes())?;
        write_attr(&root.join("bcdUSB"), hex16(config::USB_BCD_USB).as_bytes())?;
        write_attr(&root.join("bDeviceClass"), b"0x00")?;
        write_attr(&root.join("bDeviceProtocol"), b"0x00")?;
        write_attr(&root.join("bDeviceSubClass"), b"0x00")?;
        write_attr(
            &root.join("bMaxPacketSize0"),
            format!("0x{:02x}", config::USB_MAX_PACKET_SIZE_0).as_bytes(),
        )?;
        write_attr(&root.join("idVendor"), hex16(config::USB_VID).as_bytes())?;
        write_attr(&root.join("idProduct"), hex16(config::USB_PID).as_bytes())?;

        let strings = root.join("strings").join(config::USB_STRINGS_LANG);
        make_dir(&strings)?;
        write_attr(&strings.join("serialnumber"), config::USB_SERIAL_NUMBER.as_bytes())?;
        write_attr(&strings.join("manufacturer"), config::USB_MANUFACTURER.as_bytes())?;
        write_attr(&strings.join("product"), config::USB_PRODUCT.as_bytes())?;

        let cfg = root.join("configs").join(config::USB_CONFIG_NAME);
        let cfg_strings = cfg.join("strings").join(config::USB_STRINGS_LANG);
        make_dir(&cfg_strings)?;
        write_attr(&cfg_strings.join("configuration"), config::USB_CONFIG_STRING.as_bytes())?;
        write_attr(&cfg.join("MaxPower"), config::USB_MAX_POWER_MA.to_string().as_bytes())?;
        write_attr(
            &cfg.join("bmAttributes"),
            format!("0x{:02x}", config::USB_CONFIG_ATTRIBUTES).as_bytes(),
        )?;

        let mut functions = Vec::with_capacity(profiles.len());
        for (index, &profile) in profiles.iter().enumerate() {
            let name = format!("hid.usb{index}");
            let function = root.join("functions").join(&name);
            make_dir(&function)?;
            write_attr(&function.join("protocol"), profile.protocol().to_string().as_bytes())?;
            write_attr(&function.join("subclass"), profile.subclass().to_string().as_bytes())?;
            let report_length = profile.report_length() + usize::from(profile.report_id().is_some());
            write_attr(&function.join("report_length"), report_length.to_string().as_bytes())?;
            write_attr(&function.join("report_desc"), profile.report_descriptor())?;

            let link = cfg.join(&name);
            match symlink(&function, &link) {
                Err(e) if e.kind() != io::ErrorKind::AlreadyExists => {
                    return Err(Error::configfs(link, e))
                }
                _ => {}
            }
            functions.push((profile, name));
        }
        Ok(functions)
    }

    /// `/dev/hidgN` of a function, from its `dev` attribute ("major:minor").
    /// Falls back to the creation index when the attribute is unavailable.
    fn device_node(&self, function: &str, index: usize) -> PathBuf {
        let dev = self.root.join("functions").join(function).join("dev");
        let minor = fs::read_to_string(&dev).ok().and_then(|content| {
            content
                .trim()
                .split_once(':')
                .and_then(|(_, minor)| minor.parse::<u32>().ok())
        });
        let minor = minor.unwrap_or(index as u32);
        self.dev_dir.join(format!("hidg{minor}"))
    }
}

impl Default for GadgetManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Disables the gadget when dropped, including on error return or unwinding.
pub struct GadgetGuard {
    manager: GadgetManager,
}

impl GadgetGuard {
    pub fn new(manager: GadgetManager) -> Self {
        Self { manager }
    }
}

impl Deref for GadgetGuard {
    type Target = GadgetManager;

    fn deref(&self) -> &GadgetManager {
        &self.manager
    }
}

impl DerefMut for GadgetGuard {
    fn deref_mut(&mut self) -> &mut GadgetManager {
        &mut self.manager
    }
}

impl Drop for GadgetGuard {
    fn drop(&mut self) {
        if let Err(e) = self.manager.disable() {
            error!("failed to disable USB gadget: {e}");
        }
    }
}

fn hex16(value: u16) -> String {
    format!("0x{value:04x}")
}

fn make_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::configfs(path, e))
}

fn write_attr(path: &Path, value: &[u8]) -> Result<()> {
    fs::write(path, value).map_err(|e| Error::configfs(path, e))
}

/// Unbind, then remove links, strings, configurations, functions and the
/// gadget itself. Missing pieces are skipped.
fn teardown(root: &Path) -> Result<()> {
    if !root.exists() {
        return Ok(());
    }
    match fs::write(root.join("UDC"), b"") {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            return Err(Error::configfs(root.join("UDC"), e))
        }
        _ => {}
    }

    for cfg in subdirs(&root.join("configs"))? {
        for entry in entries(&cfg)? {
            if entry.file_type().map(|t| t.is_symlink()).unwrap_or(false) {
                let link = entry.path();
                ignore_missing(fs::remove_file(&link)).map_err(|e| Error::configfs(&link, e))?;
            }
        }
        for lang in subdirs(&cfg.join("strings"))? {
            remove_group(&lang)?;
        }
        remove_group(&cfg)?;
    }
    for function in subdirs(&root.join("functions"))? {
        remove_group(&function)?;
    }
    for lang in subdirs(&root.join("strings"))? {
        remove_group(&lang)?;
    }
    remove_group(root)
}

fn entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    match fs::read_dir(dir) {
        Ok(iter) => Ok(iter.filter_map(|entry| entry.ok()).collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(Error::configfs(dir, e)),
    }
}

/// Real (non-symlink) subdirectories of `dir`.
fn subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(entries(dir)?
        .into_iter()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect())
}

/// Remove a configfs group.
///
/// configfs drops attribute files together with their directory. On a
/// plain filesystem they are removed by hand and the rmdir is retried.
fn remove_group(dir: &Path) -> Result<()> {
    if ignore_missing(fs::remove_dir(dir)).is_ok() {
        return Ok(());
    }
    for entry in entries(dir)? {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            remove_group(&entry.path())?;
        } else if let Err(e) = fs::remove_file(entry.path()) {
            debug!(path = %entry.path().display(), "could not remove attribute: {e}");
        }
    }
    ignore_missing(fs::remove_dir(dir)).map_err(|e| Error::configfs(dir, e))
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
