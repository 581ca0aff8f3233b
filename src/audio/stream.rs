use anyhow::{Context, Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info};

use super::mixer::KitMixer;
use crate::kit::SoundTable;
use crate::types::events::KitEvent;

/// Frames between voice-count reports to the UI (~0.1s at 44.1kHz)
const REPORT_INTERVAL_FRAMES: u64 = 4410;

/// Enumerate output devices by display name
fn output_devices(host: &cpal::Host) -> Result<Vec<(String, cpal::Device)>> {
    let mut devices: Vec<(String, cpal::Device)> = host
        .output_devices()?
        .filter_map(|device| {
            let name = device.description().ok()?.name().to_string();
            Some((name, device))
        })
        .collect();

    // Some hosts only expose the default device explicitly
    if let Some(default_device) = host.default_output_device() {
        if let Ok(desc) = default_device.description() {
            let default_name = desc.name().to_string();
            if !devices.iter().any(|(name, _)| *name == default_name) {
                devices.push((default_name, default_device));
            }
        }
    }

    Ok(devices)
}

/// List available audio output device names
pub fn list_audio_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let names: Vec<String> = output_devices(&host)?
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    if names.is_empty() {
        return Err(anyhow!("No audio output devices found"));
    }

    Ok(names)
}

/// Find device index by index string or case-insensitive name substring
pub fn find_device(devices: &[String], search: &str) -> Result<usize> {
    if let Ok(index) = search.parse::<usize>() {
        if index < devices.len() {
            return Ok(index);
        }
        return Err(anyhow!(
            "Audio device index {} out of range (0-{})",
            index,
            devices.len().saturating_sub(1)
        ));
    }

    let search_lower = search.to_lowercase();
    devices
        .iter()
        .position(|device| device.to_lowercase().contains(&search_lower))
        .ok_or_else(|| anyhow!("Audio device '{}' not found", search))
}

/// Open the output device and start the kit mixer on its callback
///
/// The returned stream must be kept alive for as long as the kit should
/// play; dropping it stops audio.
pub fn start_output(
    device_search: Option<&str>,
    sounds: SoundTable,
    gain: f32,
    event_rx: Receiver<KitEvent>,
    voice_tx: Sender<usize>,
) -> Result<cpal::Stream> {
    let host = cpal::default_host();

    let (name, device) = match device_search {
        Some(search) => {
            let mut devices = output_devices(&host)?;
            let names: Vec<String> = devices.iter().map(|(name, _)| name.clone()).collect();
            let index = find_device(&names, search)?;
            devices.swap_remove(index)
        }
        None => {
            let device = host
                .default_output_device()
                .ok_or_else(|| anyhow!("No default audio output device"))?;
            let name = device
                .description()
                .map(|desc| desc.name().to_string())
                .unwrap_or_else(|_| "default".to_string());
            (name, device)
        }
    };

    let audio_config = device
        .default_output_config()
        .with_context(|| format!("Failed to query output config for '{}'", name))?;
    let num_channels = audio_config.channels() as usize;

    info!(
        device = %name,
        channels = num_channels,
        format = ?audio_config.sample_format(),
        "Opening audio output"
    );

    let stream = match audio_config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(
            &device,
            &audio_config.into(),
            sounds,
            gain,
            event_rx,
            voice_tx,
            num_channels,
        )?,
        cpal::SampleFormat::I16 => build_stream::<i16>(
            &device,
            &audio_config.into(),
            sounds,
            gain,
            event_rx,
            voice_tx,
            num_channels,
        )?,
        cpal::SampleFormat::U16 => build_stream::<u16>(
            &device,
            &audio_config.into(),
            sounds,
            gain,
            event_rx,
            voice_tx,
            num_channels,
        )?,
        other => return Err(anyhow!("Unsupported sample format {:?}", other)),
    };

    stream.play().context("Failed to start audio stream")?;

    Ok(stream)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sounds: SoundTable,
    gain: f32,
    event_rx: Receiver<KitEvent>,
    voice_tx: Sender<usize>,
    num_channels: usize,
) -> Result<cpal::Stream>
where
    T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
{
    let sample_rate = config.sample_rate as f32;
    let mut mixer = KitMixer::new(sample_rate, sounds, gain, event_rx);

    // Pre-allocate buffer for processing
    let mut temp_buffer = vec![0.0f32; 512 * num_channels];
    let mut frame_counter = 0u64;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / num_channels;
            let len = frames * num_channels;

            if temp_buffer.len() < len {
                temp_buffer.resize(len, 0.0);
            }

            mixer.process(&mut temp_buffer[..len], num_channels);

            for (out, sample) in data.iter_mut().zip(&temp_buffer[..len]) {
                *out = T::from_sample(*sample);
            }

            frame_counter += frames as u64;
            if frame_counter > REPORT_INTERVAL_FRAMES {
                let _ = voice_tx.try_send(mixer.active_voices());
                frame_counter = 0;
            }
        },
        |err| error!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}
