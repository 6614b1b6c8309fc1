//! Instruction stream scanning
//!
//! The metrics engine only needs the classes an instruction refers to, not
//! control flow, so the scan is one linear pass: reference-bearing opcodes
//! contribute their operand class, everything else is stepped over using a
//! per-opcode operand-width table.

use log::warn;
use once_cell::sync::Lazy;

use super::constant_pool::ConstantPool;

const GETSTATIC: u8 = 0xb2;
const INVOKEINTERFACE: u8 = 0xb9;
const NEW: u8 = 0xbb;
const ANEWARRAY: u8 = 0xbd;
const CHECKCAST: u8 = 0xc0;
const INSTANCEOF: u8 = 0xc1;
const TABLESWITCH: u8 = 0xaa;
const LOOKUPSWITCH: u8 = 0xab;
const WIDE: u8 = 0xc4;
const IINC: u8 = 0x84;

/// Operand byte count per opcode; -1 marks variable-width or undefined opcodes
static OPERAND_WIDTHS: Lazy<[i8; 256]> = Lazy::new(|| {
    let mut widths = [0i8; 256];
    for op in 0xcb..=0xfd {
        widths[op] = -1; // undefined
    }
    widths[0x10] = 1; // bipush
    widths[0x11] = 2; // sipush
    widths[0x12] = 1; // ldc
    widths[0x13] = 2; // ldc_w
    widths[0x14] = 2; // ldc2_w
    for op in 0x15..=0x19 {
        widths[op] = 1; // iload..aload
    }
    for op in 0x36..=0x3a {
        widths[op] = 1; // istore..astore
    }
    widths[0x84] = 2; // iinc
    for op in 0x99..=0xa8 {
        widths[op] = 2; // ifeq..jsr
    }
    widths[0xa9] = 1; // ret
    widths[0xaa] = -1; // tableswitch
    widths[0xab] = -1; // lookupswitch
    for op in 0xb2..=0xb8 {
        widths[op] = 2; // getstatic..invokestatic
    }
    widths[0xb9] = 4; // invokeinterface
    widths[0xba] = 4; // invokedynamic
    widths[0xbb] = 2; // new
    widths[0xbc] = 1; // newarray
    widths[0xbd] = 2; // anewarray
    widths[0xc0] = 2; // checkcast
    widths[0xc1] = 2; // instanceof
    widths[0xc4] = -1; // wide
    widths[0xc5] = 3; // multianewarray
    widths[0xc6] = 2; // ifnull
    widths[0xc7] = 2; // ifnonnull
    widths[0xc8] = 4; // goto_w
    widths[0xc9] = 4; // jsr_w
    widths
});

/// Collect the owner/operand class names referenced by a method's code array.
///
/// Invoke and field-access opcodes contribute the owner class of their
/// constant pool reference; `new`/`anewarray`/`checkcast`/`instanceof`
/// contribute their class operand. A truncated operand, an inconsistent
/// switch payload or an undefined opcode ends the scan of this one stream,
/// keeping what was collected so far.
pub fn scan_operand_types(code: &[u8], pool: &ConstantPool) -> Vec<String> {
    let mut types = Vec::new();
    let mut pc = 0usize;

    while pc < code.len() {
        let opcode = code[pc];
        match opcode {
            GETSTATIC..=INVOKEINTERFACE => match read_index(code, pc + 1) {
                Some(index) => match pool.ref_owner_class(index) {
                    Ok(name) => types.push(name),
                    Err(e) => warn!("Skipping unresolvable reference at pc {}: {}", pc, e),
                },
                None => {
                    warn!("Truncated reference operand at pc {}", pc);
                    break;
                }
            },
            NEW | ANEWARRAY | CHECKCAST | INSTANCEOF => match read_index(code, pc + 1) {
                Some(index) => match pool.class_name(index) {
                    Ok(name) => types.push(name),
                    Err(e) => warn!("Skipping unresolvable type operand at pc {}: {}", pc, e),
                },
                None => {
                    warn!("Truncated type operand at pc {}", pc);
                    break;
                }
            },
            _ => {}
        }

        match advance(code, pc) {
            Some(next) => pc = next,
            None => {
                warn!("Inconsistent instruction at pc {}, ending scan", pc);
                break;
            }
        }
    }

    types
}

fn read_index(code: &[u8], at: usize) -> Option<u16> {
    let hi = *code.get(at)?;
    let lo = *code.get(at + 1)?;
    Some(u16::from_be_bytes([hi, lo]))
}

fn read_i32(code: &[u8], at: usize) -> Option<i32> {
    let bytes = code.get(at..at + 4)?;
    Some(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Program counter after the instruction at `pc`, or None for an undefined
/// opcode or an inconsistent variable-width payload
fn advance(code: &[u8], pc: usize) -> Option<usize> {
    match code[pc] {
        TABLESWITCH => {
            // operands are 4-byte aligned relative to the start of the code array
            let aligned = (pc + 4) & !3;
            let low = read_i32(code, aligned + 4)? as i64;
            let high = read_i32(code, aligned + 8)? as i64;
            if high < low {
                return None;
            }
            let entries = (high - low + 1) as usize;
            Some(aligned + 12 + entries * 4)
        }
        LOOKUPSWITCH => {
            let aligned = (pc + 4) & !3;
            let npairs = read_i32(code, aligned + 4)?;
            if npairs < 0 {
                return None;
            }
            Some(aligned + 8 + npairs as usize * 8)
        }
        WIDE => {
            let modified = *code.get(pc + 1)?;
            Some(if modified == IINC { pc + 6 } else { pc + 4 })
        }
        opcode => {
            let width = OPERAND_WIDTHS[opcode as usize];
            if width < 0 {
                None
            } else {
                Some(pc + 1 + width as usize)
            }
        }
    }
}
