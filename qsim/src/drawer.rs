//! Text diagrams for circuits.
//!
//! Every gate gets its own column. Qubit wires are drawn with `─`, the
//! classical register with `═`. Vertical links crossing an intermediate
//! wire are drawn as `┼` for quantum links and `╫` for classical ones.

use crate::api::Pauli;
use crate::circuit::Circuit;
use crate::gate::Gate;

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Wire,
    Label(String),
    Link { classical: bool },
}

const QUANTUM_WIRE: char = '─';
const CLASSICAL_WIRE: char = '═';

pub fn draw(circuit: &Circuit) -> String {
    let classical_row = (circuit.num_clbits > 0).then_some(circuit.num_qubits);
    let num_rows = circuit.num_qubits + usize::from(classical_row.is_some());

    let mut prefixes: Vec<String> = (0..circuit.num_qubits).map(|q| format!("q{q}: ")).collect();
    if classical_row.is_some() {
        prefixes.push(format!("c{}: ", circuit.num_clbits));
    }
    let prefix_width = prefixes.iter().map(|p| p.chars().count()).max().unwrap_or(0);
    let mut lines: Vec<String> = prefixes
        .into_iter()
        .map(|p| format!("{p:<prefix_width$}"))
        .collect();

    for (row, line) in lines.iter_mut().enumerate() {
        line.push(fill_for(row, classical_row));
    }

    for gate in circuit.gates() {
        let cells = column(gate, num_rows, classical_row);
        let width = cells
            .iter()
            .map(|c| match c {
                Cell::Label(s) => s.chars().count(),
                _ => 1,
            })
            .max()
            .unwrap_or(1)
            + 2;

        for (row, (line, cell)) in lines.iter_mut().zip(cells).enumerate() {
            let fill = fill_for(row, classical_row);
            let text = match cell {
                Cell::Wire => fill.to_string(),
                Cell::Label(s) => s,
                Cell::Link { classical: true } => "╫".to_string(),
                Cell::Link { classical: false } => "┼".to_string(),
            };
            line.push_str(&center(&text, width, fill));
            line.push(fill);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn fill_for(row: usize, classical_row: Option<usize>) -> char {
    if Some(row) == classical_row {
        CLASSICAL_WIRE
    } else {
        QUANTUM_WIRE
    }
}

fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len);
    let left = pad / 2;
    let right = pad - left;
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

fn label(gate: &Gate) -> String {
    match *gate {
        Gate::H { .. } => "H".into(),
        Gate::X { .. } => "X".into(),
        Gate::Y { .. } => "Y".into(),
        Gate::Z { .. } => "Z".into(),
        Gate::S { .. } => "S".into(),
        Gate::RX { theta, .. } => format!("RX({theta:.2})"),
        Gate::RY { theta, .. } => format!("RY({theta:.2})"),
        Gate::RZ { theta, .. } => format!("RZ({theta:.2})"),
        Gate::Initialize { amplitudes, .. } => {
            let [a, b] = amplitudes;
            format!("init({:.2}, {:.2}∠{:.2})", a.norm(), b.norm(), b.arg() - a.arg())
        }
        Gate::Measure { .. } => "M".into(),
        Gate::CondPauli { pauli, .. } => match pauli {
            Pauli::I => "I".into(),
            p => p.symbol().into(),
        },
        Gate::CX { .. } | Gate::CZ { .. } => "■".into(),
    }
}

fn column(gate: &Gate, num_rows: usize, classical_row: Option<usize>) -> Vec<Cell> {
    let mut cells = vec![Cell::Wire; num_rows];
    match *gate {
        Gate::CX { control, target } | Gate::CZ { control, target } => {
            let (lo, hi) = (control.min(target), control.max(target));
            for cell in &mut cells[lo + 1..hi] {
                *cell = Cell::Link { classical: false };
            }
            cells[control] = Cell::Label("■".into());
            cells[target] = Cell::Label(if matches!(gate, Gate::CX { .. }) {
                "⊕".into()
            } else {
                "■".into()
            });
        }
        Gate::Measure { qubit, clbit } => {
            cells[qubit] = Cell::Label(label(gate));
            if let Some(c_row) = classical_row {
                for cell in &mut cells[qubit + 1..c_row] {
                    *cell = Cell::Link { classical: true };
                }
                cells[c_row] = Cell::Label(format!("{clbit}"));
            }
        }
        Gate::CondPauli { clbit, target, .. } => {
            cells[target] = Cell::Label(label(gate));
            if let Some(c_row) = classical_row {
                for cell in &mut cells[target + 1..c_row] {
                    *cell = Cell::Link { classical: true };
                }
                cells[c_row] = Cell::Label(format!("c{clbit}=1"));
            }
        }
        _ => {
            for q in gate.qubits() {
                cells[q] = Cell::Label(label(gate));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_one_row_per_wire() {
        let mut circuit = Circuit::new(3, 2);
        circuit
            .h(1)
            .unwrap()
            .cx(0, 2)
            .unwrap()
            .measure(0, 1)
            .unwrap()
            .c_pauli(1, Pauli::X, 2)
            .unwrap();
        let text = circuit.draw();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("q0: "));
        assert!(lines[3].starts_with("c2: "));
        assert!(lines[1].contains('H'));
        assert!(lines[0].contains('■'));
        assert!(lines[2].contains('⊕'));
        // The CX link crosses q1, the measurement link crosses q1 and q2.
        assert!(lines[1].contains('┼'));
        assert!(lines[1].contains('╫'));
        assert!(lines[2].contains('╫') || lines[2].contains('X'));
        assert!(lines[3].contains("c1=1"));
    }

    #[test]
    fn rows_have_equal_width() {
        let mut circuit = Circuit::new(2, 1);
        circuit.rx(0, 1.5).unwrap().cz(0, 1).unwrap().measure(1, 0).unwrap();
        let text = circuit.draw();
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{text}");
        assert!(text.contains("RX(1.50)"));
    }

    #[test]
    fn circuit_without_clbits_has_no_classical_row() {
        let mut circuit = Circuit::new(1, 0);
        circuit.x(0).unwrap();
        assert_eq!(circuit.draw().lines().count(), 1);
    }

    #[test]
    fn center_pads_evenly() {
        assert_eq!(center("H", 3, '─'), "─H─");
        assert_eq!(center("AB", 5, '═'), "═AB══");
    }
}
