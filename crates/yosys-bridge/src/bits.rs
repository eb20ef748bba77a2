use anyhow::{anyhow, bail, Result};
use n2g_netlist::State;
use serde_json::Value;

/// One entry of a Yosys `bits` array: a net-bit id or a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawBit {
    Id(u64),
    Const(State),
}

pub fn parse_bits(value: &Value) -> Result<Vec<RawBit>> {
    let mut bits = Vec::new();
    collect_bits(value, &mut bits)?;
    Ok(bits)
}

fn collect_bits(value: &Value, bits: &mut Vec<RawBit>) -> Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_bits(item, bits)?;
            }
            Ok(())
        }
        Value::Number(num) => {
            let id = num
                .as_u64()
                .ok_or_else(|| anyhow!("bit id `{num}` is not a non-negative integer"))?;
            bits.push(RawBit::Id(id));
            Ok(())
        }
        Value::String(text) => {
            if text.is_empty() {
                bail!("empty constant in bit vector");
            }
            for ch in text.chars() {
                let state = State::from_char(ch)
                    .ok_or_else(|| anyhow!("unsupported constant bit `{ch}` in bit vector"))?;
                bits.push(RawBit::Const(state));
            }
            Ok(())
        }
        other => bail!("unsupported bit entry `{other}`"),
    }
}
