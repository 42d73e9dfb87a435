use crate::dataset::Dataset;

pub fn render_index(dataset: &Dataset) -> String {
    INDEX_HTML
        .replace("{{FROM}}", &dataset.first_date.to_string())
        .replace("{{TO}}", &dataset.last_date.to_string())
        .replace("{{TOTAL}}", &dataset.total_count().to_string())
        .replace("{{PEAK}}", &dataset.count_max.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Transaction Statistics</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1060px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.peak {
      color: var(--accent);
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      appearance: none;
      border: none;
      cursor: pointer;
      background: transparent;
      border-radius: 999px;
      padding: 8px 14px;
      font-family: inherit;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b645d;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .chart-card svg {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-card svg text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .chart-line {
      fill: none;
      stroke-width: 2.5;
    }

    .chart-point {
      fill: white;
      stroke-width: 2;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 14px;
      font-size: 0.9rem;
      color: #6b645d;
    }

    .legend .dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin-right: 6px;
    }

    .controls {
      display: grid;
      grid-template-columns: minmax(180px, 280px) 1fr;
      gap: 24px;
      align-items: start;
    }

    .control .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
      margin-bottom: 8px;
    }

    select {
      width: 100%;
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 14px;
      font-family: inherit;
      font-size: 0.95rem;
      font-weight: 600;
      color: var(--accent-2);
      background: white;
      cursor: pointer;
    }

    .chips {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .chip {
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.2);
      cursor: pointer;
      background: white;
      border-radius: 999px;
      padding: 8px 14px;
      font-family: inherit;
      font-size: 0.85rem;
      font-weight: 600;
      color: #6b645d;
    }

    .chip.active {
      background: var(--accent-2);
      border-color: var(--accent-2);
      color: white;
    }

    .detail-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(380px, 1fr));
      gap: 20px;
    }

    .detail-grid h3 {
      margin: 0 0 12px;
      font-size: 1.05rem;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @media (max-width: 700px) {
      .app {
        padding: 28px 22px;
      }
      .controls {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Transaction Statistics</h1>
      <p class="subtitle">Daily transaction counts, {{FROM}} to {{TO}}.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">First day</span>
        <span class="value">{{FROM}}</span>
      </div>
      <div class="stat">
        <span class="label">Last day</span>
        <span class="value">{{TO}}</span>
      </div>
      <div class="stat">
        <span class="label">Total transactions</span>
        <span class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Daily peak</span>
        <span class="value peak">{{PEAK}}</span>
      </div>
    </section>

    <section>
      <div class="chart-header">
        <div>
          <h2>Daily counts</h2>
          <p class="subtitle">Workdays and weekends along the calendar.</p>
        </div>
        <div class="tabs" role="tablist">
          <button class="tab" type="button" data-range="1m" role="tab" aria-selected="false">1 month</button>
          <button class="tab" type="button" data-range="6m" role="tab" aria-selected="false">6 months</button>
          <button class="tab active" type="button" data-range="all" role="tab" aria-selected="true">All</button>
        </div>
      </div>
      <div class="chart-card">
        <svg id="overview-chart" viewBox="0 0 600 260" aria-label="Daily counts" role="img"></svg>
      </div>
      <div class="legend">
        <span><span class="dot" style="background: #2f4858"></span>Workday</span>
        <span><span class="dot" style="background: #ff6b4a"></span>Weekend</span>
      </div>
    </section>

    <section>
      <h2>Detailed statistics</h2>
      <div class="controls">
        <div class="control">
          <span class="label">Group by</span>
          <select id="period">
            <option value="1w">1 week</option>
            <option value="2w">2 weeks</option>
            <option value="1m" selected>1 month</option>
          </select>
        </div>
        <div class="control">
          <span class="label">Months</span>
          <div class="chips" id="month-chips"></div>
        </div>
      </div>
    </section>

    <section class="detail-grid">
      <div class="chart-card">
        <h3>Totals per period</h3>
        <svg id="agg-chart" viewBox="0 0 600 260" aria-label="Aggregated counts" role="img"></svg>
      </div>
      <div class="chart-card">
        <h3>Counts by day of month</h3>
        <svg id="months-chart" viewBox="0 0 600 260" aria-label="Monthly counts" role="img"></svg>
        <div class="legend" id="months-legend"></div>
      </div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">All charts are computed server-side from the CSV loaded at startup; the controls re-request only the affected chart.</p>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const overviewEl = document.getElementById('overview-chart');
    const aggEl = document.getElementById('agg-chart');
    const monthsEl = document.getElementById('months-chart');
    const monthsLegendEl = document.getElementById('months-legend');
    const periodEl = document.getElementById('period');
    const chipsEl = document.getElementById('month-chips');
    const rangeTabs = Array.from(document.querySelectorAll('.tab[data-range]'));

    const WORKDAY_COLOR = '#2f4858';
    const WEEKEND_COLOR = '#ff6b4a';
    const MONTH_COLORS = [
      '#ff6b4a', '#2f4858', '#e0a420', '#4a8f5d', '#8b6bb1', '#c65081',
      '#3d8ea9', '#a9743d', '#5c6f2d', '#b04a4a', '#4a5cb0', '#6d6d6d'
    ];
    const MONTH_NAMES = [
      'January', 'February', 'March', 'April', 'May', 'June',
      'July', 'August', 'September', 'October', 'November', 'December'
    ];

    let overviewData = null;
    let activeRange = 'all';
    const selectedMonths = new Set([1, 2]);

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatAxisValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const W = 600;
    const H = 260;
    const PAD_X = 44;
    const PAD_Y = 34;
    const TOP = 24;

    const gridLines = (min, max, y) => {
      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + ((max - min) * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${PAD_X}" y1="${yPos}" x2="${W - PAD_X}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${PAD_X - 10}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }
      return grid;
    };

    const emptyChart = (svg) => {
      svg.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
    };

    const renderBarChart = (svg, bars) => {
      if (!bars.length) {
        emptyChart(svg);
        return;
      }

      const max = Math.max(...bars.map((bar) => bar.value), 1);
      const innerW = W - PAD_X * 2;
      const slot = innerW / bars.length;
      const barW = Math.max(1, slot * 0.8);
      const y = (value) => H - PAD_Y - ((value / max) * (H - TOP - PAD_Y));

      const rects = bars
        .map((bar, index) => {
          const x = PAD_X + slot * index + (slot - barW) / 2;
          const top = y(bar.value);
          const opacity = bar.opacity === undefined ? 1 : bar.opacity;
          return `<rect x="${x.toFixed(2)}" y="${top.toFixed(2)}" width="${barW.toFixed(2)}" height="${(H - PAD_Y - top).toFixed(2)}" fill="${bar.color}" fill-opacity="${opacity}" />`;
        })
        .join('');

      const labelEvery = Math.max(1, Math.ceil(bars.length / 8));
      const xLabels = bars
        .map((bar, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          const x = PAD_X + slot * (index + 0.5);
          return `<text class="chart-label" x="${x.toFixed(2)}" y="${H - PAD_Y + 18}" text-anchor="middle">${bar.label}</text>`;
        })
        .join('');

      svg.innerHTML = gridLines(0, max, y) + rects + xLabels;
    };

    const renderDaySeriesChart = (svg, seriesList, bounds) => {
      if (!seriesList.some((series) => series.points.length)) {
        emptyChart(svg);
        return;
      }

      let min = Math.min(bounds.min, 0);
      let max = bounds.max;
      if (min === max) {
        min -= 1;
        max += 1;
      }

      const x = (day) => PAD_X + ((day - 1) / 30) * (W - PAD_X * 2);
      const y = (value) => H - PAD_Y - (((value - min) / (max - min)) * (H - TOP - PAD_Y));

      let xLabels = '';
      for (let day = 1; day <= 31; day += 5) {
        xLabels += `<text class="chart-label" x="${x(day).toFixed(2)}" y="${H - PAD_Y + 18}" text-anchor="middle">${day}</text>`;
      }
      xLabels += `<text class="chart-label" x="${W / 2}" y="${H - 4}" text-anchor="middle">Day of month</text>`;

      const traces = seriesList
        .map((series) => {
          if (!series.points.length) {
            return '';
          }
          const path = series.points
            .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(point.day).toFixed(2)} ${y(point.value).toFixed(2)}`)
            .join(' ');
          const dots = series.points
            .map((point) => `<circle class="chart-point" cx="${x(point.day).toFixed(2)}" cy="${y(point.value).toFixed(2)}" r="3" stroke="${series.color}" />`)
            .join('');
          return `<path class="chart-line" stroke="${series.color}" d="${path}" />${dots}`;
        })
        .join('');

      svg.innerHTML = gridLines(min, max, y) + traces + xLabels;
    };

    const shiftMonths = (iso, months) => {
      const date = new Date(`${iso}T00:00:00Z`);
      date.setUTCMonth(date.getUTCMonth() + months);
      return date.toISOString().slice(0, 10);
    };

    const renderOverview = () => {
      if (!overviewData) {
        return;
      }

      const bars = overviewData.workday
        .map((point) => ({ label: point.date.slice(5), date: point.date, value: point.count, color: WORKDAY_COLOR }))
        .concat(
          overviewData.weekend.map((point) => ({ label: point.date.slice(5), date: point.date, value: point.count, color: WEEKEND_COLOR }))
        )
        .sort((a, b) => (a.date < b.date ? -1 : 1));

      let visible = bars;
      if (activeRange !== 'all') {
        const cutoff = shiftMonths(overviewData.last_date, activeRange === '1m' ? -1 : -6);
        visible = bars.filter((bar) => bar.date >= cutoff);
      }

      renderBarChart(overviewEl, visible);
    };

    const loadOverview = async () => {
      const res = await fetch('/api/overview');
      if (!res.ok) {
        throw new Error('Unable to load daily counts');
      }
      overviewData = await res.json();
      renderOverview();
    };

    const loadAggregate = async () => {
      const res = await fetch(`/api/aggregate?period=${periodEl.value}`);
      if (!res.ok) {
        throw new Error('Unable to load aggregated counts');
      }
      const data = await res.json();
      const max = Math.max(...data.points.map((point) => point.count), 1);
      const bars = data.points.map((point) => ({
        label: data.period === '1m' ? point.start.slice(0, 7) : point.start.slice(5),
        value: point.count,
        color: WORKDAY_COLOR,
        opacity: 0.35 + 0.65 * (point.count / max)
      }));
      renderBarChart(aggEl, bars);
    };

    const loadMonths = async () => {
      const months = Array.from(selectedMonths).sort((a, b) => a - b);
      if (!months.length) {
        emptyChart(monthsEl);
        monthsLegendEl.innerHTML = '';
        return;
      }

      const res = await fetch(`/api/months?months=${months.join(',')}`);
      if (!res.ok) {
        throw new Error('Unable to load monthly counts');
      }
      const data = await res.json();
      const seriesList = data.series.map((series) => ({
        label: series.label,
        color: MONTH_COLORS[(series.month - 1) % MONTH_COLORS.length],
        points: series.points.map((point) => ({ day: point.day, value: point.count }))
      }));

      renderDaySeriesChart(monthsEl, seriesList, { min: data.count_min, max: data.count_max });
      monthsLegendEl.innerHTML = seriesList
        .map((series) => `<span><span class="dot" style="background: ${series.color}"></span>${series.label}</span>`)
        .join('');
    };

    const buildChips = () => {
      chipsEl.innerHTML = MONTH_NAMES
        .map((name, index) => {
          const month = index + 1;
          const active = selectedMonths.has(month) ? ' active' : '';
          return `<button class="chip${active}" type="button" data-month="${month}">${name.slice(0, 3)}</button>`;
        })
        .join('');

      Array.from(chipsEl.querySelectorAll('.chip')).forEach((chip) => {
        chip.addEventListener('click', () => {
          const month = Number(chip.dataset.month);
          if (selectedMonths.has(month)) {
            selectedMonths.delete(month);
          } else {
            selectedMonths.add(month);
          }
          chip.classList.toggle('active', selectedMonths.has(month));
          loadMonths().catch((err) => setStatus(err.message, 'error'));
        });
      });
    };

    rangeTabs.forEach((tab) => {
      tab.addEventListener('click', () => {
        activeRange = tab.dataset.range;
        rangeTabs.forEach((button) => {
          const isActive = button === tab;
          button.classList.toggle('active', isActive);
          button.setAttribute('aria-selected', String(isActive));
        });
        renderOverview();
      });
    });

    periodEl.addEventListener('change', () => {
      loadAggregate().catch((err) => setStatus(err.message, 'error'));
    });

    buildChips();
    Promise.all([loadOverview(), loadAggregate(), loadMonths()])
      .then(() => setStatus('', ''))
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
