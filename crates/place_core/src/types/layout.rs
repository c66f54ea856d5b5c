//! Layout data model: devices, pins and nets.
//!
//! Pins carry offsets relative to the center of their device; a net is a set
//! of pins that must be wired together. Everything is index-based: pins refer
//! to devices and nets refer to pins by id, so a [`Layout`] is cheap to clone
//! and trivially shareable across solver invocations.

use serde::{Deserialize, Serialize};

use crate::error::{PlaceError, Result};

/// Integer point on the placement plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i64,
    /// Vertical coordinate
    pub y: i64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A device to be placed onto a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Device id, equal to its index in the layout
    pub id: usize,
    /// Center coordinate (meaningful only for an already placed layout)
    pub center: Point,
    /// Half of the device width
    pub half_width: i64,
    /// Half of the device height
    pub half_height: i64,
    /// Ids of the pins mounted on this device
    pub pins: Vec<usize>,
}

/// A pin mounted on a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// Pin id, equal to its index in the layout
    pub id: usize,
    /// Id of the device the pin is mounted on
    pub device: usize,
    /// Offset of the pin relative to the device center
    pub relative: Point,
    /// Half of the pin width
    pub half_width: i64,
    /// Half of the pin height
    pub half_height: i64,
}

/// A net connecting a group of pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// Net id, equal to its index in the layout
    pub id: usize,
    /// Ids of the connected pins
    pub pins: Vec<usize>,
}

/// A full placement instance: devices, pins and the nets wiring them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Devices, indexed by id
    pub devices: Vec<Device>,
    /// Pins, indexed by id
    pub pins: Vec<Pin>,
    /// Nets, indexed by id
    pub nets: Vec<Net>,
}

impl Layout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Number of pins.
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Adds a device and returns its id.
    pub fn add_device(&mut self, half_width: i64, half_height: i64) -> usize {
        let id = self.devices.len();
        self.devices.push(Device {
            id,
            center: Point::default(),
            half_width,
            half_height,
            pins: Vec::new(),
        });
        id
    }

    /// Adds a pin on `device` at the given relative offset and returns its id.
    pub fn add_pin(&mut self, device: usize, relative: Point) -> Result<usize> {
        if device >= self.devices.len() {
            return Err(PlaceError::shape(format!(
                "pin references device {device} of {}",
                self.devices.len()
            )));
        }
        let id = self.pins.len();
        self.pins.push(Pin {
            id,
            device,
            relative,
            half_width: 0,
            half_height: 0,
        });
        self.devices[device].pins.push(id);
        Ok(id)
    }

    /// Adds a net over the given pins and returns its id.
    pub fn add_net(&mut self, pins: Vec<usize>) -> Result<usize> {
        if let Some(&bad) = pins.iter().find(|&&p| p >= self.pins.len()) {
            return Err(PlaceError::shape(format!(
                "net references pin {bad} of {}",
                self.pins.len()
            )));
        }
        let id = self.nets.len();
        self.nets.push(Net { id, pins });
        Ok(id)
    }

    /// Absolute position of a pin: device center plus relative offset.
    pub fn pin_absolute(&self, pin: usize) -> Point {
        let p = &self.pins[pin];
        let c = self.devices[p.device].center;
        Point::new(c.x + p.relative.x, c.y + p.relative.y)
    }
}
