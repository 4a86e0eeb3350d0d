#![forbid(unsafe_code)]

use std::io::{Read, Write};

pub fn write_u8(w: &mut dyn Write, v: u8) -> std::io::Result<()> {
    w.write_all(&[v])
}

pub fn write_u32(w: &mut dyn Write, v: u32) -> std::io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

pub fn write_u64(w: &mut dyn Write, v: u64) -> std::io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

pub fn read_exact<const N: usize>(r: &mut dyn Read) -> std::io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

pub fn read_u8(r: &mut dyn Read) -> std::io::Result<u8> {
    Ok(read_exact::<1>(r)?[0])
}

pub fn read_u32(r: &mut dyn Read) -> std::io::Result<u32> {
    Ok(u32::from_le_bytes(read_exact::<4>(r)?))
}

pub fn read_u64(r: &mut dyn Read) -> std::io::Result<u64> {
    Ok(u64::from_le_bytes(read_exact::<8>(r)?))
}
