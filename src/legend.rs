// Legend data for the port panel
//
// Pure derivation from the reference policy tables; the presentation layer
// renders the rows however it likes. Single ports keep the color table's
// north-to-south ordering; network ports are deduplicated and sorted.

use serde::Serialize;

use crate::reference::{self, ports};

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub port: u16,
    pub color: &'static str,
    pub name: &'static str,
}

/// One network port and the single-port regions it serves
#[derive(Debug, Clone, Serialize)]
pub struct NetworkPortGroup {
    pub port: u16,
    pub regions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub single_ports: Vec<LegendEntry>,
    pub network_ports: Vec<NetworkPortGroup>,
    pub nearest_port: u16,
}

/// Build the legend from the fixed policy tables
pub fn build_legend() -> Legend {
    let single_ports = ports::PORT_COLORS
        .iter()
        .map(|&(port, color)| LegendEntry {
            port,
            color,
            name: reference::port_name(port).unwrap_or("Unknown region"),
        })
        .collect();

    let mut net_ports: Vec<u16> = ports::NETWORK_PORTS.iter().map(|&(_, net)| net).collect();
    net_ports.sort_unstable();
    net_ports.dedup();

    let network_ports = net_ports
        .into_iter()
        .map(|net| NetworkPortGroup {
            port: net,
            regions: ports::NETWORK_PORTS
                .iter()
                .filter(|&&(_, n)| n == net)
                .filter_map(|&(single, _)| reference::port_name(single))
                .collect(),
        })
        .collect();

    Legend {
        single_ports,
        network_ports,
        nearest_port: ports::NEAREST_PORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_covers_all_seven_single_ports() {
        let legend = build_legend();
        assert_eq!(legend.single_ports.len(), 7);
        let mut ports: Vec<u16> = legend.single_ports.iter().map(|e| e.port).collect();
        ports.sort_unstable();
        assert_eq!(ports, vec![4801, 4802, 4803, 4804, 4806, 4807, 4809]);
        assert!(legend.single_ports.iter().all(|e| e.color.starts_with('#')));
        assert!(legend.single_ports.iter().all(|e| e.name != "Unknown region"));
    }

    #[test]
    fn test_network_port_groups() {
        let legend = build_legend();
        let ports: Vec<u16> = legend.network_ports.iter().map(|g| g.port).collect();
        assert_eq!(ports, vec![4811, 4812, 4813, 4814]);
        let wellington = legend.network_ports.iter().find(|g| g.port == 4814).unwrap();
        assert_eq!(wellington.regions, vec!["Wellington / Wairarapa / Manawatu"]);
    }

    #[test]
    fn test_nearest_port_row() {
        assert_eq!(build_legend().nearest_port, 4815);
    }
}
