//! Attach command implementation

use anyhow::Result;
use hunt_core::config::LayeredConfig;
use hunt_core::models::{CameraFacing, Orientation};
use hunt_session::{CapturedPhoto, PhotoRequest};
use std::fs;

use super::{describe, open_session, pick_location};
use crate::cli::AttachArgs;
use crate::errors;
use crate::output::OutputWriter;

pub async fn execute(
    args: AttachArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let bytes = fs::read(&args.file).map_err(|e| {
        errors::photo_file_unreadable(&args.file.display().to_string(), &e.to_string())
    })?;

    let request = if args.camera {
        let facing = if args.front_facing {
            CameraFacing::Front
        } else {
            CameraFacing::Rear
        };
        PhotoRequest::Capture(CapturedPhoto {
            bytes,
            orientation: args.orientation.and_then(Orientation::from_exif),
            facing,
        })
    } else {
        PhotoRequest::Pick(bytes)
    };

    let mut session = open_session(config)?;
    let location = pick_location(&mut session, &args.query, args.pick).await?;
    let resolution = session.resolve_photo(&location, request).await?;

    describe(&location, &resolution, output)
}
