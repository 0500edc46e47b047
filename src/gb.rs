//! Game Boy emulation entrypoint and associated functions and structures.
//!
//! Most of the meaningful publicly available functions and structures to
//! build a working emulator should be present here: [`GameBoy`] owns the
//! [`Cpu`] (and, through it, the [`Bus`]) and the [`Ppu`], and drives the
//! host tick loop described by the core: event drain, interrupt dispatch
//! (folded into [`Cpu::clock`]), one instruction, one DMA byte, and the
//! LY/VBlank/frame-build advance.
//!
//! # Examples
//!
//! Creates a simple [`GameBoy`] instance, boots directly past the (absent)
//! boot ROM and clocks it until PC reaches the post-boot address.
//!
//! ```rust
//! use dmg_core::gb::GameBoy;
//! let mut game_boy = GameBoy::new();
//! game_boy.load_rom_empty().unwrap();
//! game_boy.boot();
//! let cycles = game_boy.clock();
//! println!("Ran {} cycles", cycles);
//! ```

use std::fmt::{self, Display, Formatter};

use dmg_common::error::Error;
use dmg_common::util::read_file;

use crate::{
    bus::{Bus, MEMORY_SIZE},
    cpu::Cpu,
    info::Info,
    ppu::{Ppu, DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH},
};

/// A single key recognized by the (joypad-less) quit hook described in
/// the core's external interfaces: only `Escape` is meaningful, as a
/// request to quit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Escape,
    Other,
}

/// A host input event, polled non-blockingly by the driver and handed to
/// [`GameBoy::handle_event`] once per host tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    Quit,
    KeyDown(Key),
}

/// A snapshot of the register file and the PPU scroll/LY registers,
/// useful for diagnostics and for driving step-by-step test assertions.
#[derive(Clone, Copy, Debug)]
pub struct Registers {
    pub pc: u16,
    pub sp: u16,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub scy: u8,
    pub scx: u8,
    pub ly: u8,
}

/// Top level structure that bundles the CPU, bus and PPU into a single
/// element for easy access, and that owns the host tick loop.
///
/// Should serve as the main entry-point API.
pub struct GameBoy {
    /// The CPU, which in turn owns the [`Bus`] (the entire 64 KiB
    /// address space) -- there is no separate MMU object, per the
    /// core's data model: the bus is the single mutable resource,
    /// borrowed by every other component through its API.
    cpu: Cpu,

    /// The background-only PPU; reads its registers from the bus on
    /// demand rather than holding its own copy of VRAM/OAM.
    ppu: Ppu,

    /// Set once a [`Event::Quit`] or an [`Event::KeyDown`] of
    /// [`Key::Escape`] has been observed; the driver is expected to
    /// check [`GameBoy::should_quit`] and stop calling [`GameBoy::clock`].
    quit: bool,
}

impl GameBoy {
    /// The logic frequency of the Game Boy CPU, in Hz.
    pub const CPU_FREQ: u32 = 4_194_304;

    /// The visual frequency (refresh rate) of the Game Boy, close to 60 Hz.
    pub const VISUAL_FREQ: f32 = 59.7275;

    /// The number of CPU cycles that make up a complete frame (one full
    /// pass of LY from 0 through 153).
    pub const LCD_CYCLES: u32 = 70224;

    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(Bus::new()),
            ppu: Ppu::new(),
            quit: false,
        }
    }

    pub fn reset(&mut self) {
        self.cpu.bus.reset();
        self.cpu.reset();
        self.ppu.reset();
        self.quit = false;
    }

    /// Advances the system by one host tick: services a pending
    /// interrupt or executes one instruction (whichever [`Cpu::clock`]
    /// decides based on IME/halt state), advances the DMA engine by one
    /// byte if a transfer is active, and advances LY by the number of
    /// T-cycles just spent, building and presenting a full frame
    /// whenever LY wraps back to zero.
    ///
    /// Returns the number of T-cycles the CPU consumed this tick.
    pub fn clock(&mut self) -> u8 {
        let cycles = self.cpu.clock();
        self.cpu.bus.step_dma();
        self.ppu.clock(cycles, &mut self.cpu);
        cycles
    }

    /// Equivalent to [`GameBoy::clock`] but runs `count` host ticks in a
    /// single call, returning the total number of T-cycles consumed.
    pub fn clock_many(&mut self, count: usize) -> u32 {
        let mut cycles = 0u32;
        for _ in 0..count {
            cycles += self.clock() as u32;
        }
        cycles
    }

    /// Clocks the system until at least `limit` T-cycles have been
    /// consumed, returning the total number of T-cycles clocked (which
    /// may slightly exceed `limit`, since each tick is indivisible).
    pub fn clocks_cycles(&mut self, limit: usize) -> u64 {
        let mut cycles = 0u64;
        while cycles < limit as u64 {
            cycles += self.clock() as u64;
        }
        cycles
    }

    /// Clocks the system until the next full frame has been built and
    /// presented, returning the number of T-cycles that took.
    pub fn next_frame(&mut self) -> u32 {
        let mut cycles = 0u32;
        let current_frame = self.ppu.frame_index();
        while self.ppu.frame_index() == current_frame {
            cycles += self.clock() as u32;
        }
        cycles
    }

    /// Clocks the system until the CPU's PC reaches `addr`, returning the
    /// number of T-cycles that took. Used by the scenario tests in §8 of
    /// the core's contract (e.g. stepping exactly across a CALL/RET pair).
    pub fn step_to(&mut self, addr: u16) -> u32 {
        let mut cycles = 0u32;
        while self.cpu.pc() != addr {
            cycles += self.clock() as u32;
        }
        cycles
    }

    /// Hands a single polled host event to the emulator. `Quit` and
    /// `KeyDown(Key::Escape)` both arm [`GameBoy::should_quit`]; all
    /// other events are accepted and ignored, since the joypad matrix
    /// proper is out of scope for this core.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Quit => self.quit = true,
            Event::KeyDown(Key::Escape) => self.quit = true,
            Event::KeyDown(_) => {}
        }
    }

    /// Hands a batch of polled host events to the emulator, in order.
    pub fn handle_events(&mut self, events: &[Event]) {
        for &event in events {
            self.handle_event(event);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Sets the CPU registers (and the LCDC register) to the state a
    /// typical DMG boot ROM leaves behind, skipping the boot sequence
    /// entirely so cartridge execution can start directly at 0x0100.
    pub fn boot(&mut self) {
        self.cpu.boot();
    }

    /// Loads a plain, non-banked ROM image (up to 32 KiB) at 0x0000.
    pub fn load_rom(&mut self, data: &[u8]) -> Result<(), Error> {
        self.cpu.bus.load_rom(data)
    }

    /// Reads `path` from disk and loads it as a ROM image.
    pub fn load_rom_file(&mut self, path: &str) -> Result<(), Error> {
        let data = read_file(path)?;
        self.load_rom(&data)
    }

    /// Loads a blank, all-zero 32 KiB ROM; useful for tests that only
    /// care about RAM-resident code written directly through
    /// [`GameBoy::write_memory`].
    pub fn load_rom_empty(&mut self) -> Result<(), Error> {
        let data = [0u8; 0x8000];
        self.load_rom(&data)
    }

    pub fn cpu(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn cpu_i(&self) -> &Cpu {
        &self.cpu
    }

    pub fn ppu(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn ppu_i(&self) -> &Ppu {
        &self.ppu
    }

    pub fn bus(&mut self) -> &mut Bus {
        &mut self.cpu.bus
    }

    pub fn bus_i(&self) -> &Bus {
        &self.cpu.bus
    }

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.bus.read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.bus.write(addr, value);
    }

    /// Returns the 160x144 ARGB8888 framebuffer in row-major order, as
    /// last written by the PPU on the most recent frame build.
    pub fn present(&self) -> &[u32; DISPLAY_SIZE] {
        self.ppu.frame_buffer()
    }

    pub fn display_width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn display_height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    /// Returns a full copy of the 64 KiB address space, for the driver
    /// to write out as the `memory_dump.bin` artifact on shutdown.
    pub fn dump(&self) -> [u8; MEMORY_SIZE] {
        self.cpu.bus.dump()
    }

    pub fn registers(&self) -> Registers {
        Registers {
            pc: self.cpu.pc(),
            sp: self.cpu.sp(),
            a: self.cpu.a,
            b: self.cpu.b,
            c: self.cpu.c,
            d: self.cpu.d,
            e: self.cpu.e,
            h: self.cpu.h,
            l: self.cpu.l,
            scy: self.cpu.bus.read(crate::consts::SCY_ADDR),
            scx: self.cpu.bus.read(crate::consts::SCX_ADDR),
            ly: self.cpu.bus.read(crate::consts::LY_ADDR),
        }
    }

    pub fn description(&self, column_length: usize) -> String {
        let version_l = format!("{:width$}", "Version", width = column_length);
        let clock_l = format!("{:width$}", "Clock", width = column_length);
        let frame_l = format!("{:width$}", "Frame", width = column_length);
        format!(
            "{}  {}\n{}  {:.02} Mhz\n{}  {}",
            version_l,
            Info::version(),
            clock_l,
            Self::CPU_FREQ as f32 / 1_000_000.0,
            frame_l,
            self.ppu.frame_index(),
        )
    }

    pub fn description_debug(&self) -> String {
        format!(
            "{}\nCPU:\n{}\nDMA:\n{}",
            self.description(8),
            self.cpu.description_default(),
            self.cpu.bus.dma().description(),
        )
    }
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GameBoy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description(7))
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, GameBoy, Key};

    #[test]
    fn test_new_has_clean_state() {
        let gb = GameBoy::default();
        assert_eq!(gb.cpu_i().pc(), 0x0);
        assert!(!gb.should_quit());
    }

    #[test]
    fn test_boot_sets_post_boot_pc() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();
        assert_eq!(gb.cpu_i().pc(), 0x0100);
        assert_eq!(gb.cpu_i().sp(), 0xfffe);
    }

    #[test]
    fn test_escape_key_requests_quit() {
        let mut gb = GameBoy::default();
        assert!(!gb.should_quit());
        gb.handle_event(Event::KeyDown(Key::Escape));
        assert!(gb.should_quit());
    }

    #[test]
    fn test_quit_event_requests_quit() {
        let mut gb = GameBoy::default();
        gb.handle_event(Event::Quit);
        assert!(gb.should_quit());
    }

    #[test]
    fn test_step_to_call_ret_restores_pc_and_sp() {
        let mut gb = GameBoy::default();
        gb.load_rom_empty().unwrap();
        gb.cpu().set_pc(0x0100);
        gb.cpu().set_sp(0xfffe);
        // CALL 0x1234
        gb.write_memory(0x0100, 0xcd);
        gb.write_memory(0x0101, 0x34);
        gb.write_memory(0x0102, 0x12);
        // RET at the call target
        gb.write_memory(0x1234, 0xc9);

        gb.step_to(0x1234);
        assert_eq!(gb.cpu_i().sp(), 0xfffc);

        gb.step_to(0x0103);
        assert_eq!(gb.cpu_i().sp(), 0xfffe);
    }

    #[test]
    fn test_next_frame_advances_ly_through_a_full_cycle() {
        let mut gb = GameBoy::default();
        gb.load_rom_empty().unwrap();
        let before = gb.ppu_i().frame_index();
        gb.next_frame();
        assert_eq!(gb.ppu_i().frame_index(), before + 1);
    }

    #[test]
    fn test_dump_returns_full_address_space() {
        let mut gb = GameBoy::default();
        gb.write_memory(0xc000, 0x42);
        let dump = gb.dump();
        assert_eq!(dump.len(), 0x10000);
        assert_eq!(dump[0xc000], 0x42);
    }
}
