//! `ntdll` compression bindings.
//!
//! Only the three routines the backend needs are declared. All of them
//! return an `NTSTATUS`, where zero is success.

use std::ffi::c_void;

use winlz_core::error::{Result, WinlzError};

use crate::NativeFormat;

/// Best-compression engine flag, or'ed into the format for compression.
pub(crate) const COMPRESSION_ENGINE_MAXIMUM: u16 = 0x0100;

/// `STATUS_INVALID_PARAMETER`, reported when a buffer does not fit a `ULONG`.
const STATUS_INVALID_PARAMETER: u32 = 0xC000_000D;

type NtStatus = i32;

#[link(name = "ntdll")]
unsafe extern "system" {
    fn RtlGetCompressionWorkSpaceSize(
        format_and_engine: u16,
        compress_buffer_work_space_size: *mut u32,
        compress_fragment_work_space_size: *mut u32,
    ) -> NtStatus;

    fn RtlCompressBuffer(
        format_and_engine: u16,
        uncompressed_buffer: *const u8,
        uncompressed_buffer_size: u32,
        compressed_buffer: *mut u8,
        compressed_buffer_size: u32,
        uncompressed_chunk_size: u32,
        final_compressed_size: *mut u32,
        work_space: *mut c_void,
    ) -> NtStatus;

    fn RtlDecompressBuffer(
        format: u16,
        uncompressed_buffer: *mut u8,
        uncompressed_buffer_size: u32,
        compressed_buffer: *const u8,
        compressed_buffer_size: u32,
        final_uncompressed_size: *mut u32,
    ) -> NtStatus;
}

fn check(status: NtStatus) -> Result<()> {
    if status == 0 {
        Ok(())
    } else {
        Err(WinlzError::NativeFailure {
            status: status as u32,
        })
    }
}

fn ulong(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| WinlzError::NativeFailure {
        status: STATUS_INVALID_PARAMETER,
    })
}

/// Compress with the maximum engine into a buffer twice the input size.
pub(crate) fn compress(format: NativeFormat, input: &[u8]) -> Result<Vec<u8>> {
    let format_and_engine = format.code() | COMPRESSION_ENGINE_MAXIMUM;

    let mut work_space_size = 0u32;
    let mut fragment_size = 0u32;
    // SAFETY: both out-pointers refer to live locals.
    check(unsafe {
        RtlGetCompressionWorkSpaceSize(format_and_engine, &mut work_space_size, &mut fragment_size)
    })?;

    let mut work_space = vec![0u8; work_space_size as usize];
    let mut output = vec![0u8; input.len().saturating_mul(2)];
    let (input_len, output_len) = (ulong(input.len())?, ulong(output.len())?);
    let mut final_size = 0u32;

    // SAFETY: every pointer comes from a live buffer whose length is passed
    // alongside it; the work space has the size ntdll asked for.
    check(unsafe {
        RtlCompressBuffer(
            format_and_engine,
            input.as_ptr(),
            input_len,
            output.as_mut_ptr(),
            output_len,
            0,
            &mut final_size,
            work_space.as_mut_ptr().cast(),
        )
    })?;

    output.truncate(final_size as usize);
    Ok(output)
}

/// Decompress into a buffer sixteen times the input size.
pub(crate) fn decompress(format: NativeFormat, input: &[u8]) -> Result<Vec<u8>> {
    let mut output = vec![0u8; input.len().saturating_mul(16)];
    let (input_len, output_len) = (ulong(input.len())?, ulong(output.len())?);
    let mut final_size = 0u32;

    // SAFETY: both buffers are live and their lengths are passed alongside.
    check(unsafe {
        RtlDecompressBuffer(
            format.code(),
            output.as_mut_ptr(),
            output_len,
            input.as_ptr(),
            input_len,
            &mut final_size,
        )
    })?;

    output.truncate(final_size as usize);
    Ok(output)
}
