//! Sidetone through the system audio output (cpal)

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample};

use crate::backend::{ToneBackend, ToneSpec, Voice};
use crate::error::ToneError;
use crate::oscillator::SineOscillator;

/// Plays tones on a cpal output device.
///
/// Every [`start`](ToneBackend::start) builds a fresh output stream; dropping
/// the returned voice drops the stream, which closes it.
pub struct CpalBackend {
    host: cpal::Host,
    /// Requested device name, `None` for the host default
    device_name: Option<String>,
    /// Resolved on first use
    device: Option<cpal::Device>,
}

impl CpalBackend {
    pub fn new(device_name: Option<String>) -> Self {
        Self {
            host: cpal::default_host(),
            device_name,
            device: None,
        }
    }

    /// Resolve the output device now so setup problems surface before the first hold
    pub fn probe(&mut self) -> Result<String, ToneError> {
        let device = self.device()?;
        Ok(device.name().unwrap_or_else(|_| "Unknown".to_string()))
    }

    fn device(&mut self) -> Result<&cpal::Device, ToneError> {
        if self.device.is_none() {
            let device = find_output_device(&self.host, self.device_name.as_deref())?;
            if let Ok(name) = device.name() {
                tracing::info!("Using audio output device: {}", name);
            }
            self.device = Some(device);
        }
        self.device.as_ref().ok_or(ToneError::NoOutputDevice)
    }
}

impl ToneBackend for CpalBackend {
    fn name(&self) -> &str {
        "cpal"
    }

    fn start(&mut self, tone: &ToneSpec) -> Result<Voice, ToneError> {
        tone.validate()?;
        let device = self.device()?;
        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(device, &config, tone)?,
            SampleFormat::I16 => build_stream::<i16>(device, &config, tone)?,
            SampleFormat::U16 => build_stream::<u16>(device, &config, tone)?,
            other => return Err(ToneError::UnsupportedFormat(format!("{other:?}"))),
        };

        stream.play()?;
        tracing::debug!(
            "Tone started: {} Hz @ {} Hz sample rate",
            tone.frequency_hz,
            config.sample_rate.0
        );

        Ok(Voice::new("cpal", stream))
    }
}

/// Build an output stream writing the same sine sample to every channel
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    tone: &ToneSpec,
) -> Result<cpal::Stream, ToneError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut osc = SineOscillator::new(tone.frequency_hz, config.sample_rate.0, tone.volume);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let value = T::from_sample(osc.next_sample());
                for sample in frame.iter_mut() {
                    *sample = value;
                }
            }
        },
        |err| {
            tracing::warn!("Tone stream error: {}", err);
        },
        None,
    )?;

    Ok(stream)
}

/// Find an output device by name, falling back to the host default
fn find_output_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device, ToneError> {
    if let Some(wanted) = name {
        for device in host.output_devices()? {
            if let Ok(device_name) = device.name() {
                if device_name == wanted {
                    return Ok(device);
                }
            }
        }
        return Err(ToneError::DeviceNotFound(wanted.to_string()));
    }

    host.default_output_device()
        .ok_or(ToneError::NoOutputDevice)
}

/// List available audio output devices
pub fn list_output_devices() -> Vec<String> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(output_devices) = host.output_devices() {
        for device in output_devices {
            if let Ok(name) = device.name() {
                devices.push(name);
            }
        }
    }

    devices
}
